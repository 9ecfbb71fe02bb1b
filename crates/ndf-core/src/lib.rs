//! Core types and errors for the signed network definition (NDF) fetcher.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: [`Ndf`], [`TrustAnchorRef`] and [`FetchTarget`]
//! - **Policy**: the immutable [`RetryPolicy`] shared by every fetch
//! - **Errors**: the [`NdfError`] taxonomy and its [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use ndf_core::{FetchTarget, RetryPolicy, Result};
//! use std::time::Duration;
//!
//! fn settings() -> Result<(FetchTarget, RetryPolicy)> {
//!     let target = FetchTarget::new("https://example.org/ndf", "mainnet.crt")?;
//!     let policy = RetryPolicy::new(3, Duration::from_millis(500));
//!     Ok((target, policy))
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/ndf-core/0.1.0")]

mod error;
mod log_level;
mod policy;
pub mod types;

pub use error::{NdfError, Result};
pub use log_level::LogLevel;
pub use policy::RetryPolicy;
pub use types::*;
