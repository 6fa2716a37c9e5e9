//! QR code rendering
//!
//! Symbol construction is delegated to the `qrcode` crate; this module fixes
//! the rendering profile and maps user color specifiers onto RGB pixels.

mod color;
mod encoder;

pub use color::parse_color;
pub use encoder::{DEFAULT_BORDER, DEFAULT_MODULE_SIZE, QrEncoder, RenderedQr};
