/// Preview generation for scans
/// Decodes an image and shrinks it to fit a square box, off the UI thread
use image::imageops::FilterType;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Decoded RGBA pixels ready to hand to the UI
#[derive(Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

// Pixel data is far too large to print
impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Load a preview of `path` no larger than `max_edge` on either side
pub async fn load_preview(path: PathBuf, max_edge: u32) -> std::result::Result<Preview, String> {
    // Spawn blocking because decoding and resizing are CPU-intensive
    tokio::task::spawn_blocking(move || load_preview_blocking(&path, max_edge))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| e.to_string())
}

/// Blocking implementation of preview loading
pub fn load_preview_blocking(path: &Path, max_edge: u32) -> Result<Preview> {
    let img = image::open(path).map_err(|e| Error::Preview {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // Only shrink; small scans are shown as they are
    let img = if img.width() > max_edge || img.height() > max_edge {
        img.resize(max_edge, max_edge, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    tracing::trace!("preview {}x{} for {}", width, height, path.display());

    Ok(Preview {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_large_image_is_shrunk_keeping_aspect() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "wide.png", 400, 200);

        let preview = load_preview_blocking(&path, 100).unwrap();
        assert_eq!((preview.width, preview.height), (100, 50));
        assert_eq!(preview.pixels.len(), 100 * 50 * 4);
    }

    #[test]
    fn test_small_image_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "small.png", 30, 40);

        let preview = load_preview_blocking(&path, 300).unwrap();
        assert_eq!((preview.width, preview.height), (30, 40));
    }

    #[test]
    fn test_not_an_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        let err = load_preview_blocking(&path, 300).unwrap_err();
        assert!(matches!(err, Error::Preview { .. }));
    }

    #[tokio::test]
    async fn test_load_preview_async() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "scan.png", 20, 20);

        let preview = load_preview(path, 10).await.unwrap();
        assert_eq!((preview.width, preview.height), (10, 10));

        let result = load_preview(dir.path().join("missing.png"), 10).await;
        assert!(result.is_err());
    }
}
