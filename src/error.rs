//! Error types for qrgen operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using qrgen's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// Output directory could not be created
    #[error("Failed to create directory {}: {source}", path.display())]
    Directory {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// URL failed syntax validation
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    /// Fill or background color could not be parsed
    #[error("Unknown color specifier: {0}")]
    Color(String),

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error must terminate the process with a failure status.
    ///
    /// Only a missing, uncreatable output directory is fatal; every
    /// generation-time failure abandons the attempt and the run still completes.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Directory { .. })
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}
