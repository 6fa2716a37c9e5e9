//! QR code encoder

use crate::error::Result;
use image::{Rgb, RgbImage, imageops};
use qrcode::{EcLevel, QrCode, Version};

/// Pixel edge length of a single module
pub const DEFAULT_MODULE_SIZE: u32 = 10;
/// Quiet-zone width, in modules, drawn around the symbol
pub const DEFAULT_BORDER: u32 = 5;

/// A rendered QR symbol
#[derive(Debug, Clone)]
pub struct RenderedQr {
    /// RGB raster including the border
    pub image: RgbImage,
    /// Symbol version chosen for the payload
    pub version: Version,
    /// Symbol width in modules, excluding the border
    pub modules: u32,
}

/// QR code encoder
///
/// Always picks the smallest symbol version (starting at 1) that holds the
/// payload at the configured error correction level.
#[derive(Debug, Clone)]
pub struct QrEncoder {
    /// Error correction level
    ecc_level: EcLevel,
    module_size: u32,
    border: u32,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC, 10px modules, 5 module border)
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::M,
            module_size: DEFAULT_MODULE_SIZE,
            border: DEFAULT_BORDER,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: EcLevel) -> Self {
        Self {
            ecc_level,
            ..Self::new()
        }
    }

    /// Override the module size in pixels (at least 1)
    pub fn module_size(mut self, pixels: u32) -> Self {
        self.module_size = pixels.max(1);
        self
    }

    /// Override the border width in modules
    pub fn border(mut self, modules: u32) -> Self {
        self.border = modules;
        self
    }

    /// Encode `data` and render it with `fill` for dark modules and `back` elsewhere.
    pub fn encode(&self, data: &str, fill: Rgb<u8>, back: Rgb<u8>) -> Result<RenderedQr> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.ecc_level)?;
        let modules = code.width() as u32;

        let symbol = code
            .render::<Rgb<u8>>()
            .quiet_zone(false)
            .module_dimensions(self.module_size, self.module_size)
            .dark_color(fill)
            .light_color(back)
            .build();

        let offset = self.border * self.module_size;
        let side = (modules + 2 * self.border) * self.module_size;
        let mut image = RgbImage::from_pixel(side, side, back);
        imageops::replace(&mut image, &symbol, i64::from(offset), i64::from(offset));

        tracing::debug!(
            version = ?code.version(),
            modules,
            side,
            "Rendered QR symbol"
        );

        Ok(RenderedQr {
            image,
            version: code.version(),
            modules,
        })
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn decode(image: &RgbImage) -> String {
        let gray = image::DynamicImage::ImageRgb8(image.clone()).to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(gray);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR grid");
        let (_meta, content) = grids[0].decode().expect("decode grid");
        content
    }

    #[test]
    fn test_short_url_fits_version_one() {
        let rendered = QrEncoder::new().encode("https://a.io", BLACK, WHITE).unwrap();
        assert_eq!(rendered.version, Version::Normal(1));
        assert_eq!(rendered.modules, 21);
        // (21 modules + 2 * 5 border) * 10px
        assert_eq!(rendered.image.dimensions(), (310, 310));
    }

    #[test]
    fn test_longer_url_grows_version() {
        let rendered = QrEncoder::new()
            .encode("https://github.com/killuazoldyck7", BLACK, WHITE)
            .unwrap();
        assert!(matches!(rendered.version, Version::Normal(v) if v > 1));
        let side = (rendered.modules + 10) * 10;
        assert_eq!(rendered.image.dimensions(), (side, side));
    }

    #[test]
    fn test_colors_are_applied() {
        let fill = Rgb([0, 0, 128]);
        let back = Rgb([255, 255, 224]);
        let rendered = QrEncoder::new().encode("https://a.io", fill, back).unwrap();

        // Border
        assert_eq!(*rendered.image.get_pixel(0, 0), back);
        assert_eq!(*rendered.image.get_pixel(49, 49), back);
        // Top-left corner of the finder pattern
        assert_eq!(*rendered.image.get_pixel(50, 50), fill);
        // Light ring inside the finder pattern
        assert_eq!(*rendered.image.get_pixel(65, 65), back);
    }

    #[test]
    fn test_custom_geometry() {
        let rendered = QrEncoder::new()
            .module_size(4)
            .border(2)
            .encode("https://a.io", BLACK, WHITE)
            .unwrap();
        assert_eq!(rendered.image.dimensions(), ((21 + 4) * 4, (21 + 4) * 4));
    }

    #[test]
    fn test_round_trip() {
        let url = "https://example.com/some/path?x=1";
        let rendered = QrEncoder::new().encode(url, BLACK, WHITE).unwrap();
        assert_eq!(decode(&rendered.image), url);
    }

    #[test]
    fn test_payload_too_large() {
        let data = "x".repeat(8000);
        let err = QrEncoder::with_ecc_level(EcLevel::H)
            .encode(&data, BLACK, WHITE)
            .unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)), "{err}");
    }
}
