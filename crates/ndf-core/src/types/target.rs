use crate::{NdfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a pinned trust anchor (certificate or key).
///
/// What the identifier means is up to the trust anchor source: a file name,
/// a key in a table of bundled resources, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustAnchorRef(String);

impl TrustAnchorRef {
    /// Create a reference
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrustAnchorRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TrustAnchorRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TrustAnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where to fetch the NDF from and which trust anchor verifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    url: String,
    trust_anchor_ref: TrustAnchorRef,
}

impl FetchTarget {
    /// Create a target, validating that `url` is an absolute URL
    pub fn new(url: impl Into<String>, trust_anchor_ref: impl Into<TrustAnchorRef>) -> Result<Self> {
        let url = url.into();
        let parsed = url::Url::parse(&url)
            .map_err(|e| NdfError::InvalidConfiguration(format!("invalid NDF URL '{url}': {e}")))?;

        if parsed.cannot_be_a_base() {
            return Err(NdfError::InvalidConfiguration(format!(
                "NDF URL '{url}' is not a hierarchical URL"
            )));
        }

        Ok(Self {
            url,
            trust_anchor_ref: trust_anchor_ref.into(),
        })
    }

    /// The NDF endpoint
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The trust anchor used to verify the NDF
    #[must_use]
    pub const fn trust_anchor_ref(&self) -> &TrustAnchorRef {
        &self.trust_anchor_ref
    }
}
