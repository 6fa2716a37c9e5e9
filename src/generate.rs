//! Generation flow: validate, render, persist

use crate::config::QrConfig;
use crate::error::{Error, Result};
use crate::output::{ensure_directory, write_png};
use crate::qr::{QrEncoder, parse_color};
use crate::validate::is_valid_url;
use qrcode::Version;
use std::path::{Path, PathBuf};

/// Details of an image written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedQr {
    /// Destination file
    pub path: PathBuf,
    /// Size of the PNG file in bytes
    pub bytes_written: u64,
    /// Image edge length in pixels
    pub width: u32,
    /// Symbol version used
    pub version: Version,
}

/// Result of a complete run once the output directory exists
#[derive(Debug)]
pub enum RunOutcome {
    /// The image was written
    Saved(SavedQr),
    /// Generation was abandoned; nothing was written
    Skipped(Error),
}

impl RunOutcome {
    /// Whether an image was produced
    pub fn is_saved(&self) -> bool {
        matches!(self, RunOutcome::Saved(_))
    }
}

/// Validate `url`, render it with the given colors and write a PNG to `path`.
///
/// Nothing is written unless validation, color parsing and encoding all
/// succeed.
pub fn generate_and_save(
    url: &str,
    path: &Path,
    fill_color: &str,
    back_color: &str,
) -> Result<SavedQr> {
    if !is_valid_url(url) {
        println!("Invalid URL provided: {url}");
        println!("QR code generation aborted due to invalid URL.");
        return Err(Error::InvalidUrl(url.to_string()));
    }
    println!("Valid URL provided: {url}");

    let fill = parse_color(fill_color)?;
    let back = parse_color(back_color)?;
    let rendered = QrEncoder::new().encode(url, fill, back)?;

    println!("Attempting to save QR code to {}", path.display());
    let bytes_written = write_png(&rendered.image, path)?;
    println!("QR code successfully saved to {}", path.display());

    Ok(SavedQr {
        path: path.to_path_buf(),
        bytes_written,
        width: rendered.image.width(),
        version: rendered.version,
    })
}

/// Prepare the output directory and generate the configured code.
///
/// Returns `Err` only when the output directory cannot be created; every other
/// failure is reported and folded into [`RunOutcome::Skipped`].
pub fn run(config: &QrConfig) -> Result<RunOutcome> {
    println!("Output directory: {}", config.output_dir.display());
    ensure_directory(&config.output_dir)?;
    println!(
        "Directory created or already exists at: {}",
        config.output_dir.display()
    );

    let path = config.output_path();
    println!("QR code will be saved as {}", path.display());

    match generate_and_save(
        &config.target_url,
        &path,
        &config.fill_color,
        &config.back_color,
    ) {
        Ok(saved) => {
            tracing::debug!(
                path = %saved.path.display(),
                bytes = saved.bytes_written,
                width = saved.width,
                version = ?saved.version,
                "QR code written"
            );
            Ok(RunOutcome::Saved(saved))
        }
        Err(err @ Error::InvalidUrl(_)) => Ok(RunOutcome::Skipped(err)),
        Err(err) => {
            println!("Error generating or saving QR code: {err}");
            Ok(RunOutcome::Skipped(err))
        }
    }
}
