//! Render a few QR codes with different color schemes
//!
//! Usage: cargo run --example generate_qr

use qrgen::{QrEncoder, output};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let out_dir = Path::new("qr_demo");
    output::ensure_directory(out_dir)?;

    let encoder = QrEncoder::new();
    let schemes = [
        ("classic.png", "black", "white"),
        ("navy.png", "navy", "#ffffe0"),
        ("inverted.png", "rgb(240, 240, 240)", "#111"),
    ];

    for (file, fill, back) in schemes {
        let rendered = encoder.encode(
            "https://github.com/killuazoldyck7",
            qrgen::parse_color(fill)?,
            qrgen::parse_color(back)?,
        )?;
        let path = out_dir.join(file);
        let bytes = output::write_png(&rendered.image, &path)?;
        println!(
            "✓ {} ({}x{} px, {:?}, {} bytes)",
            path.display(),
            rendered.image.width(),
            rendered.image.height(),
            rendered.version,
            bytes
        );
    }

    Ok(())
}
