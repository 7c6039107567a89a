//! Grayscale previews of single-byte bands

use std::path::Path;

use image::GrayImage;
use log::{error, info};

use crate::nitf::errors::{NitfError, NitfResult};

/// Save `pixels` (one byte per pixel, row-major) as a grayscale image
///
/// The format follows the extension of `path`.
pub fn save_grayscale<P: AsRef<Path>>(path: P, width: u32, height: u32, pixels: Vec<u8>) -> NitfResult<()> {
    let expected = width as u64 * height as u64;
    if pixels.len() as u64 != expected {
        return Err(NitfError::InvalidArgument(format!(
            "{} bytes cannot fill a {}x{} preview",
            pixels.len(),
            width,
            height
        )));
    }

    let image = GrayImage::from_raw(width, height, pixels)
        .ok_or_else(|| NitfError::GenericError("preview buffer rejected".to_string()))?;
    match image.save(path.as_ref()) {
        Ok(_) => {
            info!("Preview saved to {}", path.as_ref().display());
            Ok(())
        }
        Err(e) => {
            error!("Failed to save preview: {}", e);
            Err(NitfError::GenericError(format!("Failed to save preview: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("band.png");
        save_grayscale(&path, 2, 2, vec![0, 64, 128, 255]).unwrap();

        let loaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.into_raw(), vec![0, 64, 128, 255]);
    }

    #[test]
    fn test_wrong_pixel_count() {
        assert!(save_grayscale("unused.png", 3, 3, vec![0; 4]).is_err());
    }
}
