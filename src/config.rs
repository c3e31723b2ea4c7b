use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0}")]
    Invalid(&'static str),
}

/// Image carousel with autoplay, swipe and keyboard navigation.
#[derive(Debug, Default, Parser)]
#[command(name = "carousel", version, about)]
pub struct Args {
    /// Directory of images or TOML manifest. Defaults to the built-in gallery.
    pub source: Option<PathBuf>,

    /// TOML settings file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Autoplay period in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Start with autoplay paused.
    #[arg(long)]
    pub no_autoplay: bool,

    /// Horizontal drag distance that counts as a swipe.
    #[arg(long)]
    pub swipe_threshold: Option<f32>,

    #[arg(long)]
    pub width: Option<i32>,

    #[arg(long)]
    pub height: Option<i32>,

    #[arg(long)]
    pub fps: Option<u32>,

    /// Randomize image order once at startup.
    #[arg(long)]
    pub shuffle: bool,
}

/// Contents of the optional settings file. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub source: Option<PathBuf>,
    pub interval_ms: Option<u64>,
    pub autoplay: Option<bool>,
    pub loading_ms: Option<u64>,
    pub swipe_threshold: Option<f32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub fps: Option<u32>,
    pub fetch_timeout_secs: Option<u64>,
    pub shuffle: Option<bool>,
}

impl FileSettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings: command line over settings file over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: Option<PathBuf>,
    pub autoplay_interval: f32,
    pub autoplay: bool,
    pub loading_duration: f32,
    pub swipe_threshold: f32,
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub fetch_timeout: Duration,
    pub shuffle: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            autoplay_interval: AUTOPLAY_INTERVAL,
            autoplay: true,
            loading_duration: LOADING_DURATION,
            swipe_threshold: SWIPE_THRESHOLD,
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            fps: FPS,
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT),
            shuffle: false,
        }
    }
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        Self::merge(args, file)
    }

    pub fn merge(args: &Args, file: FileSettings) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let ms = |ms: u64| ms as f32 / 1000.0;

        let settings = Self {
            source: args.source.clone().or(file.source),
            autoplay_interval: args
                .interval_ms
                .or(file.interval_ms)
                .map_or(defaults.autoplay_interval, ms),
            autoplay: !args.no_autoplay && file.autoplay.unwrap_or(defaults.autoplay),
            loading_duration: file.loading_ms.map_or(defaults.loading_duration, ms),
            swipe_threshold: args
                .swipe_threshold
                .or(file.swipe_threshold)
                .unwrap_or(defaults.swipe_threshold),
            width: args.width.or(file.width).unwrap_or(defaults.width),
            height: args.height.or(file.height).unwrap_or(defaults.height),
            fps: args.fps.or(file.fps).unwrap_or(defaults.fps),
            fetch_timeout: file
                .fetch_timeout_secs
                .map_or(defaults.fetch_timeout, Duration::from_secs),
            shuffle: args.shuffle || file.shuffle.unwrap_or(defaults.shuffle),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.autoplay_interval <= 0.0 {
            return Err(ConfigError::Invalid("autoplay interval must be positive"));
        }
        if self.swipe_threshold < 0.0 || !self.swipe_threshold.is_finite() {
            return Err(ConfigError::Invalid("swipe threshold must be a non-negative number"));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid("window size must be positive"));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive"));
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::Invalid("fetch timeout must be positive"));
        }
        Ok(())
    }
}
