//! Image resizing for display scaling and export.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `DecodedImage` instances without modifying the
//! input; the lazy display/export scale goes through [`scale_by`].

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A new `DecodedImage` with the specified dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if either dimension is zero or the
/// source image cannot be converted.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    // The BGR->RGB swap round-trips through from_rgb_image, so resampling
    // in RGB space is order-neutral
    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Compute the dimensions of an image scaled by `factor`.
///
/// Each dimension is rounded to the nearest integer and clamped to at
/// least 1 pixel.
pub fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let new_width = (width as f64 * factor as f64).round() as u32;
    let new_height = (height as f64 * factor as f64).round() as u32;
    (new_width.max(1), new_height.max(1))
}

/// Scale an image proportionally by `factor`.
///
/// A factor of exactly 1.0 skips the resize entirely and returns a clone,
/// avoiding resampling artifacts on unchanged images. The factor must be
/// finite and positive.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a non-finite or non-positive
/// factor.
pub fn scale_by(
    image: &DecodedImage,
    factor: f32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Identity scale is a no-op, not a same-size resample
    if factor == 1.0 {
        return Ok(image.clone());
    }

    let (new_width, new_height) = scaled_dimensions(image.width, image.height, factor);
    resize(image, new_width, new_height, filter)
}
