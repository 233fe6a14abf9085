//! Extension-driven image encoding.
//!
//! The output container format is inferred from the target path's extension,
//! matching the save-dialog contract: `out.png` encodes PNG, `out.jpg`
//! encodes JPEG, and an unrecognized extension is rejected before any pixel
//! work happens.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur during image encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The target path has no extension or one no encoder is configured for.
    #[error("Unsupported or missing file extension: {0}")]
    UnsupportedExtension(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The encoder itself failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// I/O error while writing the output file.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Determine the output format for a target path from its extension.
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedExtension` when the path has no
/// extension, the extension is unknown, or writing that format is not
/// enabled in this build.
pub fn format_for_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat, EncodeError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| EncodeError::UnsupportedExtension(path.display().to_string()))?;

    let format = ImageFormat::from_extension(ext)
        .ok_or_else(|| EncodeError::UnsupportedExtension(ext.to_string()))?;

    if !format.writing_enabled() {
        return Err(EncodeError::UnsupportedExtension(ext.to_string()));
    }

    Ok(format)
}

/// Encode a bitmap to bytes in the given container format.
///
/// The internal BGR buffer is converted to RGB before encoding; the input
/// image is not modified.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` or `EncodeError::InvalidPixelData`
/// when the bitmap is malformed, `EncodeError::EncodingFailed` when the
/// encoder rejects it.
pub fn encode(image: &DecodedImage, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected_len = (image.width as usize) * (image.height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let rgb = image
        .to_rgb_image()
        .ok_or_else(|| EncodeError::EncodingFailed("Failed to create RgbImage".to_string()))?;

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut buffer, format)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a bitmap and write it to `path`, format inferred from the
/// extension.
pub fn save_to_path<P: AsRef<Path>>(image: &DecodedImage, path: P) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let format = format_for_path(path)?;
    let bytes = encode(image, format)?;

    std::fs::write(path, &bytes).map_err(|e| EncodeError::Io(e.to_string()))?;
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        "wrote encoded image"
    );
    Ok(())
}
