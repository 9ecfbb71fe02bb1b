//! Collaborator interfaces consumed by the fetcher.
//!
//! The fetcher never talks to the network, the filesystem or the clock
//! directly. Each of those is injected behind one of these traits so hosts
//! can plug in their own transport and tests can substitute fakes.

use async_trait::async_trait;
use ndf_core::{Ndf, Result, TrustAnchorRef};
use std::sync::Arc;
use std::time::Duration;

/// Downloads an NDF and verifies its signature as one operation.
///
/// Returns the verified document, or an empty [`Ndf`] if the resource is
/// unavailable or fails verification. The two cases are deliberately not
/// distinguished.
#[async_trait]
pub trait VerifiedFetch: Send + Sync {
    /// Fetch `url` and verify the body against `trust_anchor`
    async fn fetch(&self, url: &str, trust_anchor: &[u8]) -> Ndf;
}

/// Supplies trust anchor bytes for an opaque reference.
///
/// Implementations must be idempotent: loading the same reference twice
/// yields identical bytes.
#[async_trait]
pub trait TrustAnchorSource: Send + Sync {
    /// Load the full byte content behind `reference`.
    ///
    /// Fails with [`ndf_core::NdfError::ResourceUnavailable`] if the
    /// reference cannot be resolved or read.
    async fn load(&self, reference: &TrustAnchorRef) -> Result<Vec<u8>>;
}

/// Suspends the current task between attempts.
#[async_trait]
pub trait Delay: Send + Sync {
    /// Sleep for `duration`
    async fn sleep(&self, duration: Duration);
}

/// [`Delay`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl<T: VerifiedFetch + ?Sized> VerifiedFetch for Arc<T> {
    async fn fetch(&self, url: &str, trust_anchor: &[u8]) -> Ndf {
        (**self).fetch(url, trust_anchor).await
    }
}

#[async_trait]
impl<T: TrustAnchorSource + ?Sized> TrustAnchorSource for Arc<T> {
    async fn load(&self, reference: &TrustAnchorRef) -> Result<Vec<u8>> {
        (**self).load(reference).await
    }
}

#[async_trait]
impl<T: Delay + ?Sized> Delay for Arc<T> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
