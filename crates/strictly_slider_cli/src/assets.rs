//! Level images resolved against a directory.

use std::path::PathBuf;
use strictly_slider::{AssetError, AssetResolver, ImageRef};
use tracing::{debug, instrument};

/// Accepts an image handle iff it names a file under `root`.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    /// Creates a resolver rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl AssetResolver for DirectoryAssets {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn resolve(&self, image: &ImageRef) -> Result<(), AssetError> {
        let path = self.root.join(image.as_str());
        if !image.as_str().is_empty() && path.is_file() {
            debug!(path = %path.display(), "Image found");
            Ok(())
        } else {
            Err(AssetError::Missing(image.clone()))
        }
    }
}
