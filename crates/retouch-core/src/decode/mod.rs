//! Image decoding pipeline for Retouch.
//!
//! This module provides functionality for:
//! - Decoding image files (JPEG, PNG, BMP) with EXIF orientation handling
//! - Resizing for the lazily-scaled display/export path
//!
//! # Channel Order
//!
//! Decoded bitmaps are stored in BGR order internally. The conversion to
//! RGB happens once, at the presentation boundary, via
//! [`DecodedImage::to_rgb_image`].
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::decode_file;
//!
//! let image = decode_file("photo.jpg")?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_bytes, decode_file};
pub use resize::{resize, scale_by, scaled_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
