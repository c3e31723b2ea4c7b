use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("duplicate image id {0} in manifest")]
    DuplicateId(u32),
    #[error("no images found in {0}")]
    Empty(String),
}

/// One entry of the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRecord {
    pub id: u32,
    /// Remote URL or local file path.
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ImageRecord {
    pub fn new(id: u32, source: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "image")]
    images: Vec<ImageRecord>,
}

/// The images shown when no source is given on the command line.
pub fn builtin() -> Vec<ImageRecord> {
    vec![
        ImageRecord::new(
            1,
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=1200&h=800&fit=crop",
            "Mountain Serenity",
            "Breathtaking mountain landscapes at golden hour",
        ),
        ImageRecord::new(
            2,
            "https://images.unsplash.com/photo-1439066615861-d1af74d74000?w=1200&h=800&fit=crop",
            "Autumn Forest",
            "Vibrant fall colors in a peaceful forest setting",
        ),
        ImageRecord::new(
            3,
            "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop",
            "Ocean Waves",
            "Pristine beaches with crystal clear waters",
        ),
        ImageRecord::new(
            4,
            "https://images.unsplash.com/photo-1472214103451-9374bd1c798e?w=1200&h=800&fit=crop",
            "Desert Sunset",
            "Dramatic desert landscape under painted skies",
        ),
        ImageRecord::new(
            5,
            "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07?w=1200&h=800&fit=crop",
            "Misty Valley",
            "Ethereal morning mist over rolling hills",
        ),
    ]
}

/// Resolve the catalog for `source`: a directory of images, a TOML
/// manifest, or the built-in list when absent.
pub fn load(source: Option<&Path>) -> Result<Vec<ImageRecord>, CatalogError> {
    match source {
        None => Ok(builtin()),
        Some(path) if path.is_dir() => from_directory(path),
        Some(path) => from_manifest(path),
    }
}

pub fn from_manifest(path: &Path) -> Result<Vec<ImageRecord>, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    parse_manifest(&text, base).map_err(|e| match e {
        ManifestError::Toml(source) => CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ManifestError::Catalog(e) => e,
    })
}

enum ManifestError {
    Toml(toml::de::Error),
    Catalog(CatalogError),
}

fn parse_manifest(text: &str, base: &Path) -> Result<Vec<ImageRecord>, ManifestError> {
    let manifest: Manifest = toml::from_str(text).map_err(ManifestError::Toml)?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(manifest.images.len());
    for mut record in manifest.images {
        if !seen.insert(record.id) {
            return Err(ManifestError::Catalog(CatalogError::DuplicateId(record.id)));
        }
        if !record.is_remote() && Path::new(&record.source).is_relative() {
            record.source = base.join(&record.source).to_string_lossy().into_owned();
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(ManifestError::Catalog(CatalogError::Empty(base.display().to_string())));
    }
    Ok(records)
}

// --- Directory Scan: images sorted by file name ---
pub fn from_directory(dir_path: &Path) -> Result<Vec<ImageRecord>, CatalogError> {
    let read_err = |source| CatalogError::Read {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        return Err(CatalogError::Empty(dir_path.display().to_string()));
    }

    Ok(paths
        .into_iter()
        .enumerate()
        .map(|(i, path)| {
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            ImageRecord::new(i as u32 + 1, path.to_string_lossy(), title, "")
        })
        .collect())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif"))
}

pub fn shuffle(records: &mut [ImageRecord]) {
    records.shuffle(&mut rand::rng());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_five_remote_images() {
        let records = builtin();
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(ImageRecord::is_remote));
        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(records[0].title, "Mountain Serenity");
        assert!(records[2].source.contains("ixlib=rb-4.0.3"));
        assert!(records[2].source.ends_with("&auto=format&fit=crop"));
    }

    #[test]
    fn manifest_resolves_relative_sources() {
        let text = r#"
            [[image]]
            id = 7
            source = "a.png"
            title = "Local"

            [[image]]
            id = 8
            source = "https://example.com/b.jpg"
            title = "Remote"
            description = "far away"
        "#;
        let records = parse_manifest(text, Path::new("/photos")).ok().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(Path::new(&records[0].source), Path::new("/photos/a.png"));
        assert_eq!(records[0].description, "");
        assert_eq!(records[1].source, "https://example.com/b.jpg");
    }

    #[test]
    fn manifest_rejects_duplicate_ids() {
        let text = r#"
            [[image]]
            id = 1
            source = "a.png"
            title = "A"

            [[image]]
            id = 1
            source = "b.png"
            title = "B"
        "#;
        assert!(matches!(
            parse_manifest(text, Path::new("")),
            Err(ManifestError::Catalog(CatalogError::DuplicateId(1)))
        ));
    }

    #[test]
    fn empty_manifest_is_an_error() {
        assert!(matches!(
            parse_manifest("", Path::new("")),
            Err(ManifestError::Catalog(CatalogError::Empty(_)))
        ));
    }

    #[test]
    fn manifest_file_parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "[[image]]\nid = \"one\"").unwrap();
        let err = load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("catalog.toml"));
    }

    #[test]
    fn directory_scan_keeps_sorted_images_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.JPG", "a.png", "notes.txt", "c.gif"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let records = load(Some(dir.path())).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(records[2].id, 3);
        assert!(!records[0].is_remote());
    }

    #[test]
    fn directory_without_images_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), b"x").unwrap();
        assert!(matches!(load(Some(dir.path())), Err(CatalogError::Empty(_))));
    }

    #[test]
    fn shuffle_keeps_every_record() {
        let mut records = builtin();
        shuffle(&mut records);
        let mut ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
