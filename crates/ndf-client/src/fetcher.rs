//! The retrying NDF fetcher.
//!
//! One call to [`NdfFetcher::fetch_ndf`] walks a small state machine:
//!
//! ```text
//! Attempting(n) --non-empty--------------------> Succeeded(ndf)
//! Attempting(n) --empty, budget spent----------> Exhausted
//! Attempting(n) --empty------------------------> Waiting(n)
//! Waiting(n)    --cancelled--------------------> Cancelled
//! Waiting(n)    --slept retry_delay------------> Attempting(n + 1)
//! ```
//!
//! The attempt counter lives on the stack of the call, so concurrent calls
//! never share progress. The trust anchor is loaded once per fetcher and
//! reused by every attempt of every call.

use crate::settings::NdfSettings;
use crate::traits::{Delay, TokioDelay, TrustAnchorSource, VerifiedFetch};
use ndf_core::{FetchTarget, Ndf, NdfError, Result, RetryPolicy};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// State of a single fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// About to issue attempt `n` (0-indexed)
    Attempting(u32),
    /// Attempt `n` came back empty, waiting before the next one
    Waiting(u32),
    /// A non-empty document was obtained
    Succeeded(Ndf),
    /// Every attempt came back empty
    Exhausted,
    /// The caller cancelled the fetch
    Cancelled,
}

impl FetchState {
    /// The state every call starts in
    #[must_use]
    pub const fn initial() -> Self {
        Self::Attempting(0)
    }

    /// Returns true for `Succeeded`, `Exhausted` and `Cancelled`
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Exhausted | Self::Cancelled)
    }

    /// Transition out of `Attempting(attempt)` given what the fetch returned.
    ///
    /// At most `max_retries + 1` attempts are made, so the last permitted
    /// attempt is the one numbered `max_retries`.
    #[must_use]
    pub fn after_attempt(attempt: u32, result: Ndf, policy: &RetryPolicy) -> Self {
        if !result.is_empty() {
            Self::Succeeded(result)
        } else if attempt >= policy.max_retries() {
            Self::Exhausted
        } else {
            Self::Waiting(attempt)
        }
    }

    /// Transition out of `Waiting(attempt)`, before sleeping.
    #[must_use]
    pub const fn after_wait_check(attempt: u32, cancelled: bool) -> Self {
        if cancelled {
            Self::Cancelled
        } else {
            Self::Attempting(attempt + 1)
        }
    }
}

/// Outcome of one fetch call, with counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    /// The document, empty if the call was exhausted
    pub ndf: Ndf,
    /// Number of fetch attempts made
    pub attempts: u32,
    /// Number of completed backoff delays
    pub delays: u32,
    /// True if every attempt came back empty
    pub exhausted: bool,
}

/// Fetches and verifies an NDF, retrying empty results.
///
/// Cloning is cheap and clones share the cached trust anchor.
#[derive(Clone)]
pub struct NdfFetcher {
    inner: Arc<FetcherInner>,
}

struct FetcherInner {
    target: FetchTarget,
    policy: RetryPolicy,
    anchor_source: Arc<dyn TrustAnchorSource>,
    fetch: Arc<dyn VerifiedFetch>,
    delay: Arc<dyn Delay>,
    trust_anchor: OnceCell<Arc<[u8]>>,
}

impl std::fmt::Debug for NdfFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NdfFetcher")
            .field("target", &self.inner.target)
            .field("policy", &self.inner.policy)
            .field("trust_anchor_loaded", &self.inner.trust_anchor.initialized())
            .finish_non_exhaustive()
    }
}

impl NdfFetcher {
    /// Create a fetcher with the default retry policy and the tokio timer
    pub fn new(
        target: FetchTarget,
        anchor_source: impl TrustAnchorSource + 'static,
        fetch: impl VerifiedFetch + 'static,
    ) -> Self {
        NdfFetcherBuilder::new(target, anchor_source, fetch).build()
    }

    /// Create a builder for custom configuration
    pub fn builder(
        target: FetchTarget,
        anchor_source: impl TrustAnchorSource + 'static,
        fetch: impl VerifiedFetch + 'static,
    ) -> NdfFetcherBuilder {
        NdfFetcherBuilder::new(target, anchor_source, fetch)
    }

    /// Create a builder preloaded with the target and retry policy from settings
    pub fn builder_from_settings(
        settings: &NdfSettings,
        anchor_source: impl TrustAnchorSource + 'static,
        fetch: impl VerifiedFetch + 'static,
    ) -> Result<NdfFetcherBuilder> {
        Ok(NdfFetcherBuilder::new(settings.target()?, anchor_source, fetch).retry_policy(settings.retry))
    }

    /// Where this fetcher downloads from
    #[must_use]
    pub fn target(&self) -> &FetchTarget {
        &self.inner.target
    }

    /// The retry policy shared by every call
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.inner.policy
    }

    /// Load the trust anchor, or return the cached copy.
    ///
    /// Concurrent first callers share a single load. A failed load is not
    /// cached, so a later call tries again.
    pub async fn load_trust_anchor(&self) -> Result<Arc<[u8]>> {
        let inner = &self.inner;
        let anchor = inner
            .trust_anchor
            .get_or_try_init(|| async {
                let reference = inner.target.trust_anchor_ref();
                debug!(reference = %reference, "loading trust anchor");
                let bytes = inner.anchor_source.load(reference).await?;
                Ok::<_, NdfError>(Arc::from(bytes))
            })
            .await?;

        Ok(Arc::clone(anchor))
    }

    /// Fetch the NDF.
    ///
    /// Returns the verified document, or an empty document once every
    /// attempt has come back empty. Fails with [`NdfError::Cancelled`] if
    /// `cancel` fires before the next attempt, and with
    /// [`NdfError::ResourceUnavailable`] if the trust anchor cannot be read.
    pub async fn fetch_ndf(&self, cancel: &CancellationToken) -> Result<Ndf> {
        Ok(self.fetch_ndf_report(cancel).await?.ndf)
    }

    /// Fetch the NDF, treating exhaustion as [`NdfError::RetriesExhausted`]
    pub async fn fetch_ndf_strict(&self, cancel: &CancellationToken) -> Result<Ndf> {
        let report = self.fetch_ndf_report(cancel).await?;

        if report.exhausted {
            Err(NdfError::RetriesExhausted {
                attempts: report.attempts,
            })
        } else {
            Ok(report.ndf)
        }
    }

    /// Fetch the NDF and report how many attempts and delays it took
    #[instrument(skip(self, cancel), fields(url = %self.inner.target.url()))]
    pub async fn fetch_ndf_report(&self, cancel: &CancellationToken) -> Result<FetchReport> {
        if cancel.is_cancelled() {
            debug!("fetch cancelled before the first attempt");
            return Err(NdfError::Cancelled);
        }

        let trust_anchor = self.load_trust_anchor().await?;
        let policy = self.inner.policy;
        let url = self.inner.target.url();

        let mut attempts: u32 = 0;
        let mut delays: u32 = 0;
        let mut state = FetchState::initial();

        loop {
            state = match state {
                FetchState::Attempting(n) => {
                    debug!(
                        attempt = n.saturating_add(1),
                        max_attempts = policy.max_attempts(),
                        "fetching NDF"
                    );
                    let result = self.inner.fetch.fetch(url, &trust_anchor).await;
                    attempts = attempts.saturating_add(1);
                    FetchState::after_attempt(n, result, &policy)
                }
                FetchState::Waiting(n) => match FetchState::after_wait_check(n, cancel.is_cancelled()) {
                    FetchState::Attempting(next) => {
                        debug!(
                            attempt = n.saturating_add(1),
                            delay = ?policy.retry_delay(),
                            "empty NDF, backing off"
                        );
                        tokio::select! {
                            biased;
                            () = cancel.cancelled() => FetchState::Cancelled,
                            () = self.inner.delay.sleep(policy.retry_delay()) => {
                                delays += 1;
                                FetchState::Attempting(next)
                            }
                        }
                    }
                    other => other,
                },
                FetchState::Succeeded(ndf) => {
                    info!(attempts, bytes = ndf.len(), "NDF fetched and verified");
                    return Ok(FetchReport {
                        ndf,
                        attempts,
                        delays,
                        exhausted: false,
                    });
                }
                FetchState::Exhausted => {
                    warn!(attempts, "no NDF available, retries exhausted");
                    return Ok(FetchReport {
                        ndf: Ndf::empty(),
                        attempts,
                        delays,
                        exhausted: true,
                    });
                }
                FetchState::Cancelled => {
                    debug!(attempts, "fetch cancelled");
                    return Err(NdfError::Cancelled);
                }
            };
        }
    }
}

/// Builder for configuring a [`NdfFetcher`]
pub struct NdfFetcherBuilder {
    target: FetchTarget,
    policy: RetryPolicy,
    anchor_source: Arc<dyn TrustAnchorSource>,
    fetch: Arc<dyn VerifiedFetch>,
    delay: Arc<dyn Delay>,
}

impl NdfFetcherBuilder {
    /// Create a new builder
    pub fn new(
        target: FetchTarget,
        anchor_source: impl TrustAnchorSource + 'static,
        fetch: impl VerifiedFetch + 'static,
    ) -> Self {
        Self {
            target,
            policy: RetryPolicy::default(),
            anchor_source: Arc::new(anchor_source),
            fetch: Arc::new(fetch),
            delay: Arc::new(TokioDelay),
        }
    }

    /// Set the retry policy
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the execution context used to wait between attempts
    #[must_use]
    pub fn delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    /// Build the fetcher
    #[must_use]
    pub fn build(self) -> NdfFetcher {
        NdfFetcher {
            inner: Arc::new(FetcherInner {
                target: self.target,
                policy: self.policy,
                anchor_source: self.anchor_source,
                fetch: self.fetch,
                delay: self.delay,
                trust_anchor: OnceCell::new(),
            }),
        }
    }
}
