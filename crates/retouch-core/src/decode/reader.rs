//! Image file decoding with EXIF orientation handling.
//!
//! The container format is guessed from the byte content rather than the
//! file extension, so a mislabeled file still decodes correctly.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw image file bytes (any container format the `image` crate
///   is configured for: JPEG, PNG, BMP)
///
/// # Returns
///
/// A `DecodedImage` with BGR pixel data and correct orientation applied.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image format, `DecodeError::CorruptedFile` if decoding fails partway.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    // Extract EXIF orientation before decoding; JFIF/PNG without EXIF
    // simply report Normal
    let orientation = extract_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented_img = apply_orientation(img, orientation);

    // Convert to 8-bit and swap into the internal BGR order
    let rgb_img = oriented_img.into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Decode the image file at `path`.
///
/// A missing or unreadable file is reported as `DecodeError::Io`; anything
/// readable goes through [`decode_bytes`].
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<DecodedImage, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DecodeError::Io(e.to_string()))?;

    let image = decode_bytes(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "decoded image file"
    );
    Ok(image)
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
