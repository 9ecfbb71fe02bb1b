//! Fetch settings loaded from config files.

use ndf_core::{FetchTarget, NdfError, Result, RetryPolicy, TrustAnchorRef};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to fetch an NDF, as stored in a config file.
///
/// ```toml
/// ndf_url = "https://elixxir-bins.s3.us-west-1.amazonaws.com/ndf/mainnet.json"
/// certificate_ref = "mainnet.crt"
///
/// [retry]
/// max_retries = 3
/// retry_delay_ms = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NdfSettings {
    /// NDF endpoint
    pub ndf_url: String,

    /// Trust anchor used to verify the NDF signature
    pub certificate_ref: TrustAnchorRef,

    /// Retry policy for empty responses
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl NdfSettings {
    /// Create settings with the default retry policy
    #[must_use]
    pub fn new(ndf_url: impl Into<String>, certificate_ref: impl Into<TrustAnchorRef>) -> Self {
        Self {
            ndf_url: ndf_url.into(),
            certificate_ref: certificate_ref.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the URL and build the fetch target
    pub fn target(&self) -> Result<FetchTarget> {
        FetchTarget::new(self.ndf_url.clone(), self.certificate_ref.clone())
    }

    /// Parse settings from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| NdfError::InvalidConfiguration(e.to_string()))?;
        settings.target()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
