//! Asset resolution for image-backed slides.

use std::path::Path;

use crate::domain::model::Asset;

/// Existence check used to decide whether an image gets embedded.
pub trait AssetProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl AssetProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Resolve `path` into an [`Asset`] if the probe reports it present right now.
pub fn resolve_asset(probe: &dyn AssetProbe, path: &Path) -> Option<Asset> {
    if probe.exists(path) {
        tracing::debug!(path = %path.display(), "image asset resolved");
        Some(Asset::new(path))
    } else {
        tracing::debug!(path = %path.display(), "image asset missing, using text fallback");
        None
    }
}
