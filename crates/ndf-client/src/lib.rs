//! Retrying, verifying fetcher for signed network definitions.
//!
//! This crate provides the main [`NdfFetcher`], the collaborator traits it
//! is composed from, and stock implementations of those traits.

#![doc(html_root_url = "https://docs.rs/ndf-client/0.1.0")]

mod anchor;
mod fetcher;
mod http;
mod settings;
mod traits;

pub use async_trait::async_trait;
pub use anchor::{FileTrustAnchorSource, StaticTrustAnchorSource};
pub use fetcher::{FetchReport, FetchState, NdfFetcher, NdfFetcherBuilder};
pub use http::{HttpVerifiedFetch, HttpVerifiedFetchBuilder};
pub use ndf_core::{FetchTarget, Ndf, NdfError, Result, RetryPolicy, TrustAnchorRef};
pub use settings::NdfSettings;
pub use tokio_util::sync::CancellationToken;
pub use traits::{Delay, TokioDelay, TrustAnchorSource, VerifiedFetch};
