//! qrgen - generate a styled PNG QR code for a URL
//!
//! The binary resolves its settings from the environment (and an optional
//! `.env` file), lets `--url` override the target, validates the URL and writes
//! a PNG QR code into the configured directory.
//!
//! # Features
//!
//! - **Explicit configuration**: [`QrConfig`] is built once and passed down
//! - **Fixed rendering profile**: smallest fitting version, 10px modules, 5 module border
//! - **Color names**: CSS names, `#rgb`, `#rrggbb` and `rgb(r, g, b)` for fill and background
//! - **Typed outcomes**: generation failures are values, not process exits
//!
//! # Example
//!
//! ```no_run
//! use qrgen::{QrConfig, RunOutcome, generate};
//!
//! fn main() -> qrgen::Result<()> {
//!     let config = QrConfig::from_env().with_url_override(Some("https://example.com".into()));
//!
//!     match generate::run(&config)? {
//!         RunOutcome::Saved(saved) => println!("wrote {}", saved.path.display()),
//!         RunOutcome::Skipped(reason) => println!("skipped: {reason}"),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod output;
pub mod qr;
pub mod validate;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LoggingOptions, QrConfig};
pub use generate::{RunOutcome, SavedQr, generate_and_save};
pub use output::ensure_directory;
pub use qr::{QrEncoder, RenderedQr, parse_color};
pub use validate::is_valid_url;
