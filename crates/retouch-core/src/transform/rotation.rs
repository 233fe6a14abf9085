//! Image rotation with canvas expansion.
//!
//! The output canvas is recomputed from the rotation angle so that no corner
//! of the source is clipped. Resampling is nearest-neighbor (no
//! anti-aliasing), which makes axis-aligned 90-degree rotations exact; those
//! angles additionally take dedicated index-remap paths so that a 90-degree
//! round trip is pixel-identical.
//!
//! # Sign Convention
//!
//! The public [`apply_rotation`] treats a positive angle as *clockwise*, the
//! application-level convention. The underlying affine helper treats a
//! positive angle as counter-clockwise, so the angle is negated once at the
//! boundary between the two. Keep that flip explicit; it is not an
//! accidental cancellation.
//!
//! # Algorithm
//!
//! The general path uses inverse mapping: for each pixel in the output
//! image, compute the source location that lands there and sample its
//! nearest pixel:
//! ```text
//! src_x = (dst_x - dst_cx) * cos θ - (dst_y - dst_cy) * sin θ + src_cx
//! src_y = (dst_x - dst_cx) * sin θ + (dst_y - dst_cy) * cos θ + src_cy
//! ```

use crate::decode::DecodedImage;

/// Tolerance for matching axis-aligned angles after normalization.
const AXIS_EPSILON: f64 = 0.001;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This function calculates the bounding box that contains the entire
/// rotated image:
/// `bw = h*|sin θ| + w*|cos θ|`, `bh = h*|cos θ| + w*|sin θ|`, rounded
/// down to integers (minimum 1). Axis-aligned angles take exact paths.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (either direction; the
///   bounding box is symmetric in sign)
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let angle = angle_degrees.rem_euclid(360.0);

    // Fast paths: axis-aligned rotations have exact bounds
    if angle < AXIS_EPSILON || (360.0 - angle) < AXIS_EPSILON || (angle - 180.0).abs() < AXIS_EPSILON
    {
        return (width, height);
    }
    if (angle - 90.0).abs() < AXIS_EPSILON || (angle - 270.0).abs() < AXIS_EPSILON {
        return (height, width);
    }

    let angle_rad = angle.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (h * sin + w * cos).floor() as u32;
    let new_h = (h * cos + w * sin).floor() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image clockwise by `angle_degrees` about its center.
///
/// The output canvas is expanded per [`compute_rotated_bounds`] so the
/// rotated content is fully contained; pixels outside the source map to
/// black. An angle that normalizes to 0 returns a clone. Multiples of 90
/// degrees are exact index remaps; everything else goes through the
/// nearest-neighbor inverse-mapping path.
pub fn apply_rotation(image: &DecodedImage, angle_degrees: f64) -> DecodedImage {
    let angle = angle_degrees.rem_euclid(360.0);

    if angle < AXIS_EPSILON || (360.0 - angle) < AXIS_EPSILON {
        return image.clone();
    }
    if (angle - 90.0).abs() < AXIS_EPSILON {
        return rotate90_cw(image);
    }
    if (angle - 180.0).abs() < AXIS_EPSILON {
        return rotate180(image);
    }
    if (angle - 270.0).abs() < AXIS_EPSILON {
        return rotate270_cw(image);
    }

    // The affine helper is counter-clockwise-positive; the application
    // convention is clockwise-positive. Flip the sign here and only here.
    warp_nearest_ccw(image, -angle)
}

/// Read the BGR triple at (px, py); caller guarantees bounds.
#[inline]
fn get_pixel(image: &DecodedImage, px: usize, py: usize) -> [u8; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx],
        image.pixels[idx + 1],
        image.pixels[idx + 2],
    ]
}

/// Exact clockwise quarter turn: source (x, y) lands at (h-1-y, x).
fn rotate90_cw(image: &DecodedImage) -> DecodedImage {
    let (w, h) = (image.width, image.height);
    let mut output = vec![0u8; (w * h * 3) as usize];

    for dst_y in 0..w {
        for dst_x in 0..h {
            let src_x = dst_y;
            let src_y = h - 1 - dst_x;
            let src_idx = ((src_y * w + src_x) * 3) as usize;
            let dst_idx = ((dst_y * h + dst_x) * 3) as usize;
            output[dst_idx..dst_idx + 3].copy_from_slice(&image.pixels[src_idx..src_idx + 3]);
        }
    }

    DecodedImage::new(h, w, output)
}

/// Exact half turn.
fn rotate180(image: &DecodedImage) -> DecodedImage {
    let (w, h) = (image.width, image.height);
    let mut output = vec![0u8; (w * h * 3) as usize];

    for dst_y in 0..h {
        for dst_x in 0..w {
            let src_x = w - 1 - dst_x;
            let src_y = h - 1 - dst_y;
            let src_idx = ((src_y * w + src_x) * 3) as usize;
            let dst_idx = ((dst_y * w + dst_x) * 3) as usize;
            output[dst_idx..dst_idx + 3].copy_from_slice(&image.pixels[src_idx..src_idx + 3]);
        }
    }

    DecodedImage::new(w, h, output)
}

/// Exact counter-clockwise quarter turn (270 clockwise): source (x, y)
/// lands at (y, w-1-x).
fn rotate270_cw(image: &DecodedImage) -> DecodedImage {
    let (w, h) = (image.width, image.height);
    let mut output = vec![0u8; (w * h * 3) as usize];

    for dst_y in 0..w {
        for dst_x in 0..h {
            let src_x = w - 1 - dst_y;
            let src_y = dst_x;
            let src_idx = ((src_y * w + src_x) * 3) as usize;
            let dst_idx = ((dst_y * h + dst_x) * 3) as usize;
            output[dst_idx..dst_idx + 3].copy_from_slice(&image.pixels[src_idx..src_idx + 3]);
        }
    }

    DecodedImage::new(h, w, output)
}

/// General rotation, counter-clockwise for positive angles, re-centered into
/// the expanded canvas, nearest-neighbor sampled.
fn warp_nearest_ccw(image: &DecodedImage, angle_degrees: f64) -> DecodedImage {
    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Center of source and destination images
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; (dst_w * dst_h * 3) as usize];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Translate destination point to origin at center
            let dx = dst_x as f64 - dst_cx;
            let dy = dst_y as f64 - dst_cy;

            // Apply inverse rotation to find source coordinates
            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let pixel = sample_nearest(image, src_x, src_y);

            let dst_idx = ((dst_y * dst_w + dst_x) * 3) as usize;
            output[dst_idx] = pixel[0];
            output[dst_idx + 1] = pixel[1];
            output[dst_idx + 2] = pixel[2];
        }
    }

    DecodedImage::new(dst_w, dst_h, output)
}

/// Sample the nearest pixel; out-of-bounds coordinates resolve to black.
fn sample_nearest(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let px = x.round();
    let py = y.round();

    if px < 0.0 || px >= image.width as f64 || py < 0.0 || py >= image.height as f64 {
        return [0, 0, 0];
    }

    get_pixel(image, px as usize, py as usize)
}
