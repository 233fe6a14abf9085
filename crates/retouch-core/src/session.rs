//! The edit session controller.
//!
//! Sequences user-triggered operations against the [`ImageStore`]:
//! `load -> [crop | rotate | scale]* -> [reset]? -> save`. The session has
//! two states, `Empty` and `Loaded`; no operation runs before a successful
//! load, and every failure leaves the existing state untouched.
//!
//! Crop and rotation are baked into the edited bitmap eagerly; scale is
//! recorded and applied lazily when the bitmap is read for display or
//! export. That asymmetry is deliberate: save-time behavior depends on it.
//!
//! Everything is synchronous on the caller's thread, including file I/O;
//! `&mut self` on every mutating operation is what enforces the
//! single-writer rule.

use std::path::Path;

use thiserror::Error;

use crate::decode::{decode_file, scale_by, DecodeError, DecodedImage, FilterType};
use crate::encode::{save_to_path, EncodeError};
use crate::store::ImageStore;
use crate::transform::{apply_crop, apply_rotation, CropError};
use crate::{CropRect, EditParams};

/// States of the edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No image loaded; every edit operation is rejected.
    Empty,
    /// An image is loaded and may be edited arbitrarily.
    Loaded,
}

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An edit operation was attempted before any successful load.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Scale factor is zero, negative, or not finite.
    #[error("Invalid scale factor: {0} (must be finite and positive)")]
    InvalidScaleFactor(f32),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Crop(#[from] CropError),
}

/// Controller owning the image store and the current edit parameters.
#[derive(Debug, Default)]
pub struct EditSession {
    store: ImageStore,
    params: EditParams,
}

impl EditSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the session.
    pub fn state(&self) -> SessionState {
        if self.store.is_loaded() {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    /// Current edit parameters.
    pub fn params(&self) -> &EditParams {
        &self.params
    }

    /// Path of the loaded image file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.store.path()
    }

    /// Default directory for load/save dialogs.
    pub fn directory(&self) -> &Path {
        self.store.directory()
    }

    /// The unmodified bitmap from the last load.
    pub fn original(&self) -> Result<&DecodedImage, SessionError> {
        self.store.original().ok_or(SessionError::NoImageLoaded)
    }

    /// The bitmap with all eager edits applied (lazy scale *not* applied).
    pub fn edited(&self) -> Result<&DecodedImage, SessionError> {
        self.store.edited().ok_or(SessionError::NoImageLoaded)
    }

    /// Load the image file at `path`, replacing any previous state
    /// wholesale and resetting all edit parameters.
    ///
    /// A failed decode leaves the prior image and parameters intact.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SessionError> {
        let path = path.as_ref();

        // Decode before touching any state so a failure changes nothing
        let image = decode_file(path)?;

        tracing::info!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "session: image loaded"
        );
        self.store.set_loaded(path.to_path_buf(), image);
        self.params = EditParams::default();
        Ok(())
    }

    /// Crop the edited bitmap to the rectangle `(x0, y0)`-`(x1, y1)` in
    /// its pixel space and record the rectangle.
    pub fn crop(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<(), SessionError> {
        let rect = CropRect::new(x0, y0, x1, y1);
        let cropped = match apply_crop(self.edited()?, rect) {
            Ok(cropped) => cropped,
            Err(err) => {
                tracing::warn!(%err, "session: crop rejected");
                return Err(err.into());
            }
        };

        self.store.replace_edited(cropped);
        self.params.crop = Some(rect);
        Ok(())
    }

    /// Rotate the edited bitmap by `delta_degrees` (positive = clockwise)
    /// and accumulate the normalized angle.
    ///
    /// Deltas are a signed multiple of 90 in the application's surface;
    /// other values fall through to the general nearest-neighbor path.
    /// A delta that normalizes to 0 is a no-op.
    pub fn rotate(&mut self, delta_degrees: i32) -> Result<(), SessionError> {
        let edited = self.edited()?;

        let delta = delta_degrees.rem_euclid(360) as u32;
        if delta == 0 {
            return Ok(());
        }

        let rotated = apply_rotation(edited, f64::from(delta));
        self.store.replace_edited(rotated);
        self.params.rotation_degrees = (self.params.rotation_degrees + delta) % 360;
        tracing::debug!(
            delta = delta_degrees,
            angle = self.params.rotation_degrees,
            "session: rotated"
        );
        Ok(())
    }

    /// Set the display/export scale factor.
    ///
    /// The factor is absolute, not cumulative: each call overwrites the
    /// previous one. The edited bitmap itself is never resized in storage;
    /// scaling happens lazily in [`display_image`](Self::display_image) and
    /// [`save`](Self::save).
    pub fn scale(&mut self, factor: f32) -> Result<(), SessionError> {
        if self.state() == SessionState::Empty {
            return Err(SessionError::NoImageLoaded);
        }
        if !factor.is_finite() || factor <= 0.0 {
            tracing::warn!(factor, "session: scale factor rejected");
            return Err(SessionError::InvalidScaleFactor(factor));
        }

        self.params.scale_factor = factor;
        Ok(())
    }

    /// Revert the edited bitmap to the original and zero all edit
    /// parameters.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state() == SessionState::Empty {
            return Err(SessionError::NoImageLoaded);
        }

        self.store.reset_edited();
        self.params = EditParams::default();
        tracing::debug!("session: reset to original");
        Ok(())
    }

    /// The edited bitmap with the lazy scale factor applied.
    ///
    /// At factor 1.0 the scaling step is skipped entirely, not resampled
    /// to identical dimensions.
    fn scaled_edited(&self) -> Result<DecodedImage, SessionError> {
        let edited = self.edited()?;
        Ok(scale_by(edited, self.params.scale_factor, FilterType::Bilinear)?)
    }

    /// Produce the display-ready bitmap for the presentation surface: the
    /// edited bitmap, lazily scaled, converted to RGB.
    ///
    /// The returned image is an independently-owned copy; the presentation
    /// layer may drop or repaint it freely without affecting the session.
    pub fn display_image(&self) -> Result<image::RgbImage, SessionError> {
        let scaled = self.scaled_edited()?;
        scaled.to_rgb_image().ok_or_else(|| {
            SessionError::Encode(EncodeError::EncodingFailed(
                "Failed to create RgbImage".to_string(),
            ))
        })
    }

    /// Export the edited bitmap to `path`, format inferred from the
    /// extension, with the current scale factor applied.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SessionError> {
        let path = path.as_ref();
        let scaled = self.scaled_edited()?;
        save_to_path(&scaled, path)?;
        tracing::info!(
            path = %path.display(),
            width = scaled.width,
            height = scaled.height,
            "session: image saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::save_to_path;
    use std::path::PathBuf;

    /// Test image with position-dependent pixel values.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v.wrapping_add(1));
                pixels.push(v.wrapping_add(2));
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    /// Write `img` to a uniquely named temp PNG and return its path.
    fn temp_png(tag: &str, img: &DecodedImage) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "retouch-session-{}-{}.png",
            tag,
            std::process::id()
        ));
        save_to_path(img, &path).unwrap();
        path
    }

    /// Session with `img` loaded from a temp PNG.
    fn loaded_session(tag: &str, img: &DecodedImage) -> (EditSession, PathBuf) {
        let path = temp_png(tag, img);
        let mut session = EditSession::new();
        session.load(&path).unwrap();
        (session, path)
    }

    #[test]
    fn test_operations_before_load_fail() {
        let mut session = EditSession::new();
        assert_eq!(session.state(), SessionState::Empty);

        assert!(matches!(session.crop(0, 0, 10, 10), Err(SessionError::NoImageLoaded)));
        assert!(matches!(session.rotate(90), Err(SessionError::NoImageLoaded)));
        assert!(matches!(session.scale(0.5), Err(SessionError::NoImageLoaded)));
        assert!(matches!(session.reset(), Err(SessionError::NoImageLoaded)));
        assert!(matches!(session.save("out.png"), Err(SessionError::NoImageLoaded)));
        assert!(matches!(session.edited(), Err(SessionError::NoImageLoaded)));
        assert!(matches!(session.original(), Err(SessionError::NoImageLoaded)));
        assert!(matches!(session.display_image(), Err(SessionError::NoImageLoaded)));

        // No state was created by the failed operations
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn test_load_populates_state() {
        let img = test_image(20, 10);
        let (session, path) = loaded_session("load", &img);

        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.original().unwrap(), &img); // PNG is lossless
        assert_eq!(session.edited().unwrap(), &img);
        assert!(session.params().is_default());
        assert_eq!(session.path().unwrap(), path.as_path());
        assert_eq!(session.directory(), std::env::temp_dir());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_failed_load_keeps_prior_state() {
        let img = test_image(20, 10);
        let (mut session, path) = loaded_session("load-fail", &img);
        session.rotate(90).unwrap();
        let edited_before = session.edited().unwrap().clone();

        let result = session.load("/nonexistent/nope.png");
        assert!(matches!(result, Err(SessionError::Decode(DecodeError::Io(_)))));

        // Prior image, edits, and parameters all intact
        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.edited().unwrap(), &edited_before);
        assert_eq!(session.params().rotation_degrees, 90);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_second_load_replaces_wholesale() {
        let (mut session, path1) = loaded_session("reload-a", &test_image(20, 10));
        session.rotate(90).unwrap();
        session.scale(0.5).unwrap();

        let path2 = temp_png("reload-b", &test_image(8, 8));
        session.load(&path2).unwrap();

        assert_eq!(session.edited().unwrap().width, 8);
        assert!(session.params().is_default());

        std::fs::remove_file(&path1).ok();
        std::fs::remove_file(&path2).ok();
    }

    #[test]
    fn test_crop_bakes_into_edited() {
        let (mut session, path) = loaded_session("crop", &test_image(100, 100));

        session.crop(10, 10, 60, 40).unwrap();
        let edited = session.edited().unwrap();
        assert_eq!(edited.width, 50);
        assert_eq!(edited.height, 30);
        assert_eq!(session.params().crop, Some(CropRect::new(10, 10, 60, 40)));

        // Original untouched
        assert_eq!(session.original().unwrap().width, 100);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_crop_save_round_trip() {
        let (mut session, path) = loaded_session("crop-save", &test_image(100, 100));
        session.crop(10, 10, 60, 40).unwrap();

        let out = std::env::temp_dir().join(format!(
            "retouch-session-crop-out-{}.png",
            std::process::id()
        ));
        session.save(&out).unwrap();

        let reloaded = crate::decode::decode_file(&out).unwrap();
        assert_eq!(reloaded.width, 50);
        assert_eq!(reloaded.height, 30);
        assert_eq!(reloaded.pixels, session.edited().unwrap().pixels);

        std::fs::remove_file(&path).ok();
        std::fs::remove_file(&out).ok();
    }

    #[test]
    fn test_invalid_crop_leaves_state_unchanged() {
        let (mut session, path) = loaded_session("crop-bad", &test_image(10, 10));
        let before = session.edited().unwrap().clone();

        assert!(matches!(
            session.crop(6, 0, 4, 10),
            Err(SessionError::Crop(CropError::EmptyRegion { .. }))
        ));
        assert!(matches!(
            session.crop(0, 0, 11, 10),
            Err(SessionError::Crop(CropError::OutOfBounds { .. }))
        ));

        assert_eq!(session.edited().unwrap(), &before);
        assert_eq!(session.params().crop, None);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rotate_90_swaps_dimensions() {
        let (mut session, path) = loaded_session("rot90", &test_image(100, 50));

        session.rotate(90).unwrap();
        let edited = session.edited().unwrap();
        assert_eq!(edited.width, 50);
        assert_eq!(edited.height, 100);
        assert_eq!(session.params().rotation_degrees, 90);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rotate_round_trip_is_pixel_exact() {
        let (mut session, path) = loaded_session("rot-rt", &test_image(100, 50));
        let before = session.edited().unwrap().clone();

        session.rotate(90).unwrap();
        session.rotate(-90).unwrap();

        assert_eq!(session.edited().unwrap(), &before);
        assert_eq!(session.params().rotation_degrees, 0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rotation_angle_accumulates_mod_360() {
        let (mut session, path) = loaded_session("rot-acc", &test_image(16, 16));

        session.rotate(90).unwrap();
        session.rotate(90).unwrap();
        assert_eq!(session.params().rotation_degrees, 180);

        session.rotate(270).unwrap();
        assert_eq!(session.params().rotation_degrees, 90);

        session.rotate(-90).unwrap();
        assert_eq!(session.params().rotation_degrees, 0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rotate_zero_is_noop() {
        let (mut session, path) = loaded_session("rot0", &test_image(16, 8));
        let before = session.edited().unwrap().clone();

        session.rotate(0).unwrap();
        session.rotate(360).unwrap();
        session.rotate(-720).unwrap();

        assert_eq!(session.edited().unwrap(), &before);
        assert_eq!(session.params().rotation_degrees, 0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_scale_is_lazy() {
        let (mut session, path) = loaded_session("scale-lazy", &test_image(100, 50));
        let before = session.edited().unwrap().clone();

        session.scale(0.5).unwrap();

        // Stored bitmap untouched
        assert_eq!(session.edited().unwrap(), &before);
        // Display-ready copy is scaled
        let display = session.display_image().unwrap();
        assert_eq!(display.dimensions(), (50, 25));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_scale_applied_on_save() {
        let (mut session, path) = loaded_session("scale-save", &test_image(100, 50));
        session.scale(0.5).unwrap();

        let out = std::env::temp_dir().join(format!(
            "retouch-session-scale-out-{}.png",
            std::process::id()
        ));
        session.save(&out).unwrap();

        let reloaded = crate::decode::decode_file(&out).unwrap();
        assert_eq!(reloaded.width, 50);
        assert_eq!(reloaded.height, 25);
        // In-memory edited bitmap is still unscaled
        assert_eq!(session.edited().unwrap().width, 100);

        std::fs::remove_file(&path).ok();
        std::fs::remove_file(&out).ok();
    }

    #[test]
    fn test_scale_overwrites_instead_of_compounding() {
        let (mut session, path) = loaded_session("scale-abs", &test_image(100, 50));

        session.scale(0.5).unwrap();
        session.scale(0.5).unwrap();
        assert_eq!(session.params().scale_factor, 0.5);
        assert_eq!(session.display_image().unwrap().dimensions(), (50, 25));

        session.scale(1.5).unwrap();
        assert_eq!(session.display_image().unwrap().dimensions(), (150, 75));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_scale_identity_skips_resampling() {
        let img = test_image(33, 17);
        let (mut session, path) = loaded_session("scale-id", &img);

        session.scale(1.0).unwrap();
        let display = session.display_image().unwrap();
        assert_eq!(display.dimensions(), (33, 17));
        // Pixels survive exactly: no resample pass at factor 1.0
        assert_eq!(
            DecodedImage::from_rgb_image(display).pixels,
            session.edited().unwrap().pixels
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_scale_factor_rejected() {
        let (mut session, path) = loaded_session("scale-bad", &test_image(10, 10));

        for bad in [0.0f32, -0.5, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                session.scale(bad),
                Err(SessionError::InvalidScaleFactor(_))
            ));
        }
        assert_eq!(session.params().scale_factor, 1.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_reset_restores_original_and_params() {
        let img = test_image(60, 40);
        let (mut session, path) = loaded_session("reset", &img);

        session.crop(5, 5, 50, 30).unwrap();
        session.rotate(90).unwrap();
        session.scale(0.75).unwrap();

        session.reset().unwrap();

        // Byte-for-byte restore of the decoded original
        assert_eq!(session.edited().unwrap(), &img);
        assert!(session.params().is_default());
        assert_eq!(session.state(), SessionState::Loaded);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_unsupported_extension() {
        let (session, path) = loaded_session("save-ext", &test_image(8, 8));

        let result = session.save("/tmp/retouch-session-bad.xyz");
        assert!(matches!(
            result,
            Err(SessionError::Encode(EncodeError::UnsupportedExtension(_)))
        ));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_display_image_is_independent_copy() {
        let (session, path) = loaded_session("display", &test_image(10, 10));

        let mut display = session.display_image().unwrap();
        // Scribble over the copy; the session's bitmap must not change
        for px in display.pixels_mut() {
            px.0 = [0, 0, 0];
        }
        assert_ne!(session.edited().unwrap().pixels, vec![0u8; 10 * 10 * 3]);

        std::fs::remove_file(&path).ok();
    }
}
