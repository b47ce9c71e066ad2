//! Reading input images from disk and writing the finished poster.
//!
//! These helpers sit outside the composer: they turn paths into decoded
//! images and the composed image into JPEG bytes on disk.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::PosterError;

/// JPEG quality used for the finished poster (the usual libjpeg default).
pub const JPEG_QUALITY: u8 = 75;

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage, PosterError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes, path)
}

/// Decode image bytes in any format the `image` crate reads. `path` is only
/// used in error messages.
pub fn decode_image(bytes: &[u8], path: &Path) -> Result<DynamicImage, PosterError> {
    image::load_from_memory(bytes)
        .map_err(|e| PosterError::Image(format!("Failed to decode {}: {}", path.display(), e)))
}

/// Decode an optional image, reporting and ignoring failures.
pub fn load_optional(path: &Path, what: &str) -> Option<DynamicImage> {
    if !path.exists() {
        info!(path = %path.display(), "{} not found; continuing without it", what);
        return None;
    }
    match load_image(path) {
        Ok(img) => Some(img),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "{} could not be loaded; continuing without it", what);
            None
        }
    }
}

/// Decode every readable asset, skipping the ones that fail.
pub fn load_assets(paths: &[PathBuf]) -> Vec<DynamicImage> {
    paths
        .iter()
        .filter_map(|path| match load_image(path) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping asset");
                None
            }
        })
        .collect()
}

/// Encode the poster as JPEG.
pub fn encode_jpeg(poster: &RgbImage, quality: u8) -> Result<Vec<u8>, PosterError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(poster)
        .map_err(|e| PosterError::Image(format!("Failed to encode JPEG: {}", e)))?;
    Ok(bytes)
}

/// Write `bytes` to `output`, and also into `copy_dir` (created if needed)
/// under the same file name. Returns every path written.
pub fn write_output(bytes: &[u8], output: &Path, copy_dir: Option<&Path>) -> Result<Vec<PathBuf>, PosterError> {
    std::fs::write(output, bytes)?;
    let mut written = vec![output.to_path_buf()];

    if let Some(dir) = copy_dir {
        std::fs::create_dir_all(dir)?;
        let name = output.file_name().unwrap_or(output.as_os_str());
        let copy = dir.join(name);
        std::fs::write(&copy, bytes)?;
        written.push(copy);
    }

    Ok(written)
}
