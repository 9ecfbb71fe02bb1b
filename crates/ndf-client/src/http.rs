//! HTTP implementation of [`VerifiedFetch`].
//!
//! The endpoint serves a JSON envelope:
//!
//! ```json
//! { "ndf": "<base64 document>", "signature": "<base64 Ed25519 signature>" }
//! ```
//!
//! The trust anchor is the Ed25519 public key, either as 32 raw bytes or as
//! base64 text. Every failure, from a refused connection to a bad
//! signature, is logged and reported as an empty document.

use crate::traits::VerifiedFetch;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ndf_core::{Ndf, NdfError, Result};
use reqwest::Client as HttpClient;
use ring::signature::{UnparsedPublicKey, ED25519};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Length of an Ed25519 public key
const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Largest envelope accepted from the endpoint
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Signed NDF envelope served by the endpoint
#[derive(Debug, Deserialize)]
struct SignedEnvelope {
    ndf: String,
    signature: String,
}

/// Why a download did not yield a verified document
#[derive(Error, Debug)]
enum FetchFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error("malformed envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("invalid base64 in {field}: {source}")]
    Encoding {
        field: &'static str,
        source: base64::DecodeError,
    },

    #[error("trust anchor is not an Ed25519 public key")]
    TrustAnchor,

    #[error("signature does not match trust anchor")]
    Signature,

    #[error("document is not valid UTF-8")]
    NotUtf8,

    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Downloads a signed NDF over HTTP and verifies it with `ring`
#[derive(Debug, Clone)]
pub struct HttpVerifiedFetch {
    http: HttpClient,
    max_body_bytes: usize,
}

impl HttpVerifiedFetch {
    /// Create a fetcher with default settings
    pub fn new() -> Result<Self> {
        HttpVerifiedFetchBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> HttpVerifiedFetchBuilder {
        HttpVerifiedFetchBuilder::new()
    }

    async fn download_and_verify(&self, url: &str, trust_anchor: &[u8]) -> std::result::Result<Ndf, FetchFailure> {
        debug!(url = %url, "GET signed NDF");

        let mut response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let limit = self.max_body_bytes;
        if response
            .content_length()
            .is_some_and(|len| len > u64::try_from(limit).unwrap_or(u64::MAX))
        {
            return Err(FetchFailure::TooLarge { limit });
        }

        // Content-Length may be absent or wrong; enforce the cap on what arrives
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(FetchFailure::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        let envelope: SignedEnvelope = serde_json::from_slice(&body)?;
        verify_envelope(&envelope, trust_anchor)
    }
}

#[async_trait]
impl VerifiedFetch for HttpVerifiedFetch {
    async fn fetch(&self, url: &str, trust_anchor: &[u8]) -> Ndf {
        match self.download_and_verify(url, trust_anchor).await {
            Ok(ndf) => ndf,
            Err(e) => {
                warn!(url = %url, error = %e, "NDF download did not verify");
                Ndf::empty()
            }
        }
    }
}

fn verify_envelope(envelope: &SignedEnvelope, trust_anchor: &[u8]) -> std::result::Result<Ndf, FetchFailure> {
    let public_key = parse_public_key(trust_anchor)?;

    let document = STANDARD
        .decode(envelope.ndf.trim())
        .map_err(|source| FetchFailure::Encoding { field: "ndf", source })?;
    let signature = STANDARD
        .decode(envelope.signature.trim())
        .map_err(|source| FetchFailure::Encoding {
            field: "signature",
            source,
        })?;

    UnparsedPublicKey::new(&ED25519, &public_key)
        .verify(&document, &signature)
        .map_err(|_| FetchFailure::Signature)?;

    String::from_utf8(document)
        .map(Ndf::from)
        .map_err(|_| FetchFailure::NotUtf8)
}

/// Accept either raw key bytes or base64 text with surrounding whitespace
fn parse_public_key(trust_anchor: &[u8]) -> std::result::Result<Vec<u8>, FetchFailure> {
    if trust_anchor.len() == ED25519_PUBLIC_KEY_LEN {
        return Ok(trust_anchor.to_vec());
    }

    let text = std::str::from_utf8(trust_anchor).map_err(|_| FetchFailure::TrustAnchor)?;
    let key = STANDARD
        .decode(text.trim())
        .map_err(|_| FetchFailure::TrustAnchor)?;

    if key.len() == ED25519_PUBLIC_KEY_LEN {
        Ok(key)
    } else {
        Err(FetchFailure::TrustAnchor)
    }
}

/// Builder for configuring a [`HttpVerifiedFetch`]
pub struct HttpVerifiedFetchBuilder {
    timeout: Duration,
    user_agent: String,
    max_body_bytes: usize,
}

impl Default for HttpVerifiedFetchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpVerifiedFetchBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("ndf-rust/{}", env!("CARGO_PKG_VERSION")),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the largest response body accepted before giving up on a download
    #[must_use]
    pub const fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Build the fetcher
    pub fn build(self) -> Result<HttpVerifiedFetch> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| NdfError::InvalidConfiguration(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpVerifiedFetch {
            http,
            max_body_bytes: self.max_body_bytes,
        })
    }
}
