//! qrgen runtime configuration handling
//!
//! Settings come from three layers, lowest precedence first: literal defaults,
//! the process environment (optionally seeded from a `.env` file), and the
//! `--url` command-line override.

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// URL encoded when neither `QR_DATA_URL` nor `--url` is given
pub const DEFAULT_URL: &str = "https://github.com/killuazoldyck7";
/// Output directory used when `QR_CODE_DIR` is unset
pub const DEFAULT_DIR: &str = "qr_codes";
/// Output file name used when `QR_CODE_FILENAME` is unset
pub const DEFAULT_FILENAME: &str = "github_qr.png";
/// Module color used when `FILL_COLOR` is unset
pub const DEFAULT_FILL_COLOR: &str = "black";
/// Background color used when `BACK_COLOR` is unset
pub const DEFAULT_BACK_COLOR: &str = "white";

/// Fully resolved settings for a single generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrConfig {
    /// URL to encode
    pub target_url: String,
    /// Directory the image is written into, created on demand
    pub output_dir: PathBuf,
    /// File name of the image inside `output_dir`
    pub output_filename: String,
    /// Color of dark modules
    pub fill_color: String,
    /// Color of light modules and the border
    pub back_color: String,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_DIR),
            output_filename: DEFAULT_FILENAME.to_string(),
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            back_color: DEFAULT_BACK_COLOR.to_string(),
        }
    }
}

impl QrConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Values are taken verbatim; nothing is validated until generation.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env_overrides(&lookup);
        config
    }

    fn apply_env_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("QR_DATA_URL") {
            self.target_url = url;
        }
        if let Some(dir) = lookup("QR_CODE_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(filename) = lookup("QR_CODE_FILENAME") {
            self.output_filename = filename;
        }
        if let Some(fill) = lookup("FILL_COLOR") {
            self.fill_color = fill;
        }
        if let Some(back) = lookup("BACK_COLOR") {
            self.back_color = back;
        }
    }

    /// Replace the target URL when one was given on the command line.
    pub fn with_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.target_url = url;
        }
        self
    }

    /// Full path of the image file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }
}

/// Load a `.env` file from the current directory or one of its ancestors.
///
/// Variables already present in the environment keep their values. Returns the
/// path that was loaded, or `None` when no file exists.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(Error::Config(format!("Failed to load .env file: {err}"))),
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Filter directive (overridable via `QR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing log lines
    pub file: Option<PathBuf>,
    /// Emit ANSI colors in stdout logging
    pub color: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: false,
        }
    }
}

impl LoggingOptions {
    /// Resolve logging options from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve logging options through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        options.apply_env_overrides(&lookup);
        options
    }

    fn apply_env_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QR_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.level = level;
            }
        }
        if let Some(file) = lookup("QR_LOG_FILE") {
            if file.trim().is_empty() {
                self.file = None;
            } else {
                self.file = Some(PathBuf::from(file));
            }
        }
        if let Some(color) = lookup("QR_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
    }
}
