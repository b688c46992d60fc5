// SPDX-License-Identifier: MPL-2.0
//! Image loading.

use std::fs;
use std::path::Path;

use image_rs::DynamicImage;

use crate::error::{Error, Result};

/// Loads a raster image from disk.
///
/// The format is guessed from the file content, not the extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The content is not a supported image ([`Error::Image`])
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    let image = image_rs::load_from_memory(&bytes)?;
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn load_png_image_returns_expected_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image_path = temp_dir.path().join("sample.png");

        let image = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        image
            .save(&image_path)
            .expect("failed to write temporary png");

        let data = load_image(&image_path).expect("png should load successfully");
        assert_eq!(data.width(), 4);
        assert_eq!(data.height(), 2);
    }

    #[test]
    fn load_missing_image_returns_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing_path = temp_dir.path().join("does_not_exist.png");

        match load_image(&missing_path) {
            Err(Error::Io(message)) => assert!(message.contains("does_not_exist.png")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_invalid_png_bytes_returns_image_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let bad_path = temp_dir.path().join("invalid.png");
        fs::write(&bad_path, b"not a png").expect("failed to write invalid data");

        match load_image(&bad_path) {
            Err(Error::Image(message)) => assert!(!message.is_empty()),
            other => panic!("expected Image error for invalid png, got {other:?}"),
        }
    }
}
