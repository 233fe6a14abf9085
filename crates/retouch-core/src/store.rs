//! Owned edit-state storage: the original/edited bitmap pair and the
//! backing file path.
//!
//! The store is deliberately a plain struct owned by the session controller
//! rather than ambient state. It holds the immutable original bitmap, the
//! mutable edited bitmap derived from it, and the path the image was loaded
//! from; the path's directory is remembered as the default location for
//! subsequent load/save dialogs.

use std::path::{Path, PathBuf};

use crate::decode::DecodedImage;

/// Holds the bitmaps and path for the currently loaded image, if any.
#[derive(Debug, Default)]
pub struct ImageStore {
    path: Option<PathBuf>,
    dir: Option<PathBuf>,
    original: Option<DecodedImage>,
    edited: Option<DecodedImage>,
}

impl ImageStore {
    /// Create an empty store with no image loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.original.is_some()
    }

    /// Replace the entire state with a freshly decoded image.
    ///
    /// Both the original and edited bitmaps are set to `image`; any prior
    /// state is discarded wholesale.
    pub fn set_loaded(&mut self, path: PathBuf, image: DecodedImage) {
        tracing::debug!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "store: replacing loaded image"
        );
        self.dir = path.parent().map(Path::to_path_buf);
        self.path = Some(path);
        self.edited = Some(image.clone());
        self.original = Some(image);
    }

    /// The unmodified bitmap from the last load.
    pub fn original(&self) -> Option<&DecodedImage> {
        self.original.as_ref()
    }

    /// The bitmap reflecting all transforms since the last load or reset.
    pub fn edited(&self) -> Option<&DecodedImage> {
        self.edited.as_ref()
    }

    /// Replace the edited bitmap with the result of a transform.
    ///
    /// No-op while nothing is loaded; callers check `is_loaded` first.
    pub fn replace_edited(&mut self, image: DecodedImage) {
        if self.original.is_some() {
            tracing::debug!(
                width = image.width,
                height = image.height,
                "store: edited bitmap replaced"
            );
            self.edited = Some(image);
        }
    }

    /// Revert the edited bitmap to a copy of the original.
    pub fn reset_edited(&mut self) {
        self.edited = self.original.clone();
    }

    /// Path of the backing file, once loaded.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory of the backing file; the default location for load/save
    /// dialogs. Root until the first successful load.
    pub fn directory(&self) -> &Path {
        self.dir.as_deref().unwrap_or_else(|| Path::new("/"))
    }
}
