//! Retouch Core - Image edit-session library
//!
//! This crate provides the editing core for Retouch: decoding image files
//! into an original/edited bitmap pair, the crop/rotate/scale/reset
//! transform operations, and the session controller that sequences them and
//! produces display-ready output for a presentation layer.

pub mod decode;
pub mod encode;
pub mod session;
pub mod store;
pub mod transform;

pub use decode::{decode_bytes, decode_file, DecodeError, DecodedImage, FilterType};
pub use encode::{save_to_path, EncodeError};
pub use session::{EditSession, SessionError, SessionState};
pub use store::ImageStore;
pub use transform::{apply_crop, apply_rotation, compute_rotated_bounds, CropError};

/// Crop rectangle in source pixel space.
///
/// `(x0, y0)` is the inclusive top-left corner, `(x1, y1)` the exclusive
/// bottom-right corner, as reported by the presentation layer's drag
/// selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CropRect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the rectangle; zero when inverted.
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Height of the rectangle; zero when inverted.
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

/// Edit parameters for the current session.
///
/// Crop and rotation are recorded after being baked into the edited bitmap;
/// the scale factor is the one lazily applied at display/export time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditParams {
    /// Last applied crop rectangle, absent until the first crop.
    pub crop: Option<CropRect>,
    /// Cumulative rotation angle in degrees, normalized to [0, 360).
    pub rotation_degrees: u32,
    /// Display/export scale factor (1.0 = unscaled).
    pub scale_factor: f32,
}

impl Default for EditParams {
    fn default() -> Self {
        Self {
            crop: None,
            rotation_degrees: 0,
            scale_factor: 1.0,
        }
    }
}

impl EditParams {
    /// Create a new EditParams with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
