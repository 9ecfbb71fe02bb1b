//! Trust anchor sources.
//!
//! - [`StaticTrustAnchorSource`]: anchors bundled into the binary
//! - [`FileTrustAnchorSource`]: anchors read from a directory on disk

use crate::traits::TrustAnchorSource;
use async_trait::async_trait;
use ndf_core::{NdfError, Result, TrustAnchorRef};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// In-memory table of trust anchors, typically filled with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct StaticTrustAnchorSource {
    anchors: HashMap<TrustAnchorRef, Arc<[u8]>>,
}

impl StaticTrustAnchorSource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an anchor (builder style)
    #[must_use]
    pub fn with_anchor(mut self, reference: impl Into<TrustAnchorRef>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(reference, bytes);
        self
    }

    /// Add or replace an anchor
    pub fn insert(&mut self, reference: impl Into<TrustAnchorRef>, bytes: impl Into<Vec<u8>>) {
        let bytes: Vec<u8> = bytes.into();
        self.anchors.insert(reference.into(), Arc::from(bytes));
    }

    /// Number of anchors held
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns true if no anchors are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

#[async_trait]
impl TrustAnchorSource for StaticTrustAnchorSource {
    async fn load(&self, reference: &TrustAnchorRef) -> Result<Vec<u8>> {
        self.anchors
            .get(reference)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| NdfError::unavailable(reference.as_str(), "no bundled trust anchor with this name"))
    }
}

/// Reads trust anchors from files under a root directory.
///
/// A reference is a relative path inside the root. References that are
/// absolute or contain `..` are refused.
#[derive(Debug, Clone)]
pub struct FileTrustAnchorSource {
    root: PathBuf,
}

impl FileTrustAnchorSource {
    /// Create a source rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory anchors are resolved against
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a reference to a path under the root
    pub fn resolve(&self, reference: &TrustAnchorRef) -> Result<PathBuf> {
        let relative = Path::new(reference.as_str());

        if reference.as_str().is_empty() {
            return Err(NdfError::unavailable(reference.as_str(), "empty reference"));
        }

        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained {
            return Err(NdfError::unavailable(
                reference.as_str(),
                "reference must be a relative path inside the anchor directory",
            ));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl TrustAnchorSource for FileTrustAnchorSource {
    async fn load(&self, reference: &TrustAnchorRef) -> Result<Vec<u8>> {
        let path = self.resolve(reference)?;
        debug!(path = %path.display(), "reading trust anchor");

        tokio::fs::read(&path)
            .await
            .map_err(|e| NdfError::unavailable(reference.as_str(), format!("{}: {e}", path.display())))
    }
}
