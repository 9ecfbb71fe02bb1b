//! Fetch signed network definitions (NDFs) with pinned trust anchors and
//! bounded retry.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ndf::{CancellationToken, FetchTarget, FileTrustAnchorSource, HttpVerifiedFetch, NdfFetcher, RetryPolicy};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> ndf::Result<()> {
//!     let target = FetchTarget::new("https://ndf.example.org/mainnet.json", "mainnet.key")?;
//!     let fetcher = NdfFetcher::builder(
//!         target,
//!         FileTrustAnchorSource::new("/etc/ndf"),
//!         HttpVerifiedFetch::new()?,
//!     )
//!     .retry_policy(RetryPolicy::new(3, Duration::from_secs(1)))
//!     .build();
//!
//!     let ndf = fetcher.fetch_ndf(&CancellationToken::new()).await?;
//!     println!("{} bytes", ndf.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/ndf/0.1.0")]

// Re-export core types
pub use ndf_core::*;

// Re-export client
pub use ndf_client::{
    CancellationToken, Delay, FetchReport, FetchState, FileTrustAnchorSource, HttpVerifiedFetch,
    HttpVerifiedFetchBuilder, NdfFetcher, NdfFetcherBuilder, NdfSettings, StaticTrustAnchorSource,
    TokioDelay, TrustAnchorSource, VerifiedFetch,
};

// Needed to implement the collaborator traits
pub use ndf_client::async_trait;

// Re-export runtime for convenience
pub use tokio;
pub use tokio_util;
