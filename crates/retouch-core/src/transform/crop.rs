//! Rectangular crop extraction.
//!
//! Crop coordinates are in the source bitmap's pixel space, `(x0, y0)`
//! inclusive top-left to `(x1, y1)` exclusive bottom-right, as reported by
//! the presentation layer's drag selection. Degenerate or out-of-bounds
//! rectangles are rejected up front instead of silently producing an empty
//! bitmap.

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::CropRect;

/// Errors for crop region validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CropError {
    /// The rectangle is inverted or has no area (`x1 <= x0` or `y1 <= y0`).
    #[error("Empty or inverted crop region ({x0},{y0})-({x1},{y1})")]
    EmptyRegion { x0: u32, y0: u32, x1: u32, y1: u32 },

    /// The rectangle extends past the image edge.
    #[error("Crop region ({x0},{y0})-({x1},{y1}) exceeds image bounds {width}x{height}")]
    OutOfBounds {
        x0: u32,
        y0: u32,
        x1: u32,
        y1: u32,
        width: u32,
        height: u32,
    },
}

/// Extract the rectangular sub-region `[y0..y1, x0..x1]` of an image.
///
/// The result is a `(y1 - y0) x (x1 - x0)` bitmap whose pixel at `(i, j)`
/// equals the source pixel at `(y0 + i, x0 + j)`. The source is not
/// modified.
///
/// # Errors
///
/// * `CropError::EmptyRegion` for inverted or zero-area rectangles
/// * `CropError::OutOfBounds` when the rectangle exceeds the image bounds
pub fn apply_crop(image: &DecodedImage, rect: CropRect) -> Result<DecodedImage, CropError> {
    let CropRect { x0, y0, x1, y1 } = rect;

    if x1 <= x0 || y1 <= y0 {
        return Err(CropError::EmptyRegion { x0, y0, x1, y1 });
    }
    if x1 > image.width || y1 > image.height {
        return Err(CropError::OutOfBounds {
            x0,
            y0,
            x1,
            y1,
            width: image.width,
            height: image.height,
        });
    }

    let out_width = x1 - x0;
    let out_height = y1 - y0;

    // Fast path: full-frame crop is a clone
    if out_width == image.width && out_height == image.height {
        return Ok(image.clone());
    }

    let mut output = Vec::with_capacity((out_width * out_height * 3) as usize);

    // Copy row by row; rows are contiguous in the source buffer
    for y in 0..out_height {
        let src_y = y0 + y;
        let row_start = ((src_y * image.width + x0) * 3) as usize;
        let row_end = row_start + (out_width * 3) as usize;
        output.extend_from_slice(&image.pixels[row_start..row_end]);
    }

    Ok(DecodedImage::new(out_width, out_height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
