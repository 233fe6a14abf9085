//! Image transformation operations: rotation and cropping.
//!
//! These are the eager edits: both bake their result into a new bitmap,
//! unlike display scaling, which stays lazy (see `decode::scale_by`).
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are pixel positions in the source bitmap, top-left
//!   inclusive, bottom-right exclusive
//! - Origin is the top-left corner

mod crop;
mod rotation;

pub use crop::{apply_crop, CropError};
pub use rotation::{apply_rotation, compute_rotated_bounds};
