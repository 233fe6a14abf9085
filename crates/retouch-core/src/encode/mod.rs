//! Image encoding pipeline for Retouch.
//!
//! This module provides functionality for:
//! - Encoding bitmaps to the container format implied by a file extension
//! - Writing encoded bytes to disk for the save path
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::save_to_path;
//!
//! save_to_path(&image, "out.png")?;
//! ```

mod writer;

pub use writer::{encode, format_for_path, save_to_path, EncodeError};
