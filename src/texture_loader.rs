use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use thiserror::Error;

use crate::catalog::ImageRecord;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode image {0}: {1}")]
    Decode(String, String),
    #[error("failed to create texture for {0}: {1}")]
    Texture(String, String),
}

/// Image bytes plus the file type hint raylib needs to decode them.
#[derive(Debug)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub extension: String,
}

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Read the raw bytes of `record`, from disk or over http.
pub fn fetch(client: &reqwest::blocking::Client, record: &ImageRecord) -> Result<Encoded, LoadError> {
    if record.is_remote() {
        let http_err = |source| LoadError::Http {
            url: record.source.clone(),
            source,
        };
        let response = client
            .get(&record.source)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(http_err)?;
        let extension = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(extension_for_mime)
            .unwrap_or("jpg")
            .to_string();
        let bytes = response.bytes().map_err(http_err)?.to_vec();
        Ok(Encoded { bytes, extension })
    } else {
        let path = Path::new(&record.source);
        let bytes = fs::read(path).map_err(|source| LoadError::Read {
            path: record.source.clone(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        Ok(Encoded { bytes, extension })
    }
}

fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime.split(';').next()?.trim() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/bmp" => Some("bmp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// EXIF orientation of a JPEG, 1 (normal) when absent or unreadable.
pub fn exif_orientation(encoded: &Encoded) -> u16 {
    if encoded.extension != "jpg" && encoded.extension != "jpeg" {
        return 1;
    }
    match Reader::new().read_from_container(&mut Cursor::new(&encoded.bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            log::debug!("no EXIF data: {}", e);
            1
        }
    }
}

// --- Decode Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    name: &str,
    encoded: &Encoded,
) -> Result<Texture2D, LoadError> {
    let mut image = Image::load_image_from_mem(&format!(".{}", encoded.extension), &encoded.bytes)
        .map_err(|e| LoadError::Decode(name.to_string(), e.to_string()))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are drawn as-is.
    match exif_orientation(encoded) {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| LoadError::Texture(name.to_string(), e.to_string()))
}
