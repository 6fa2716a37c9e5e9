//! Filesystem helpers for persisting rendered codes

use crate::error::{Error, Result};
use image::{ImageFormat, RgbImage};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

/// Create `path` and any missing parents. An existing directory is not an error.
pub fn ensure_directory(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| Error::Directory {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Output directory ready");
    Ok(())
}

/// Encode `image` as PNG and write it to `path`, replacing any existing file.
///
/// The PNG is fully encoded in memory before the file is opened, so an encoder
/// failure leaves the destination untouched. Returns the number of bytes written.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<u64> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    let bytes = buffer.into_inner();

    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    file.flush()?;

    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_ensure_directory_creates_parents() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("c");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("codes");
        ensure_directory(&dir).unwrap();
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_directory_blocked_by_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let target = blocker.join("codes");
        let err = ensure_directory(&target).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains(&target.display().to_string()));
    }

    #[test]
    fn test_write_png_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.png");
        std::fs::write(&path, vec![0u8; 100_000]).unwrap();

        let image = RgbImage::from_pixel(8, 8, Rgb([255, 0, 0]));
        let written = write_png(&image, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len() as u64, written);
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_write_png_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("out.png");
        let image = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));

        let err = write_png(&image, &path).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err}");
        assert!(!err.is_fatal());
    }
}
