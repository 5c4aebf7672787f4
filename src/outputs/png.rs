//! Card image persistence.

use crate::error::Result;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Encode the canvas as an RGB PNG and write it to `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn save_png(canvas: &RgbaImage, path: &Path) -> Result<()> {
    let rgb = DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Png)?;
    let bytes = buf.into_inner();

    fs::write(path, &bytes).await?;
    info!(bytes = bytes.len(), "Image output successfully saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    #[tokio::test]
    async fn test_save_png_writes_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraping_result.png");
        let canvas = RgbaImage::from_pixel(16, 8, Rgba([10, 20, 30, 255]));

        save_png(&canvas, &path).await.unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert!(matches!(decoded, DynamicImage::ImageRgb8(_)));
        assert_eq!(decoded.to_rgb8().get_pixel(3, 3).0, [10, 20, 30]);
    }
}
