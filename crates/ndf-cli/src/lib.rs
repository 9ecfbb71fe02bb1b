//! # ndf-cli
//!
//! Command-line interface for fetching signed network definitions.
//!
//! ## Features
//!
//! - **Verified fetch**: download and check an NDF against a pinned key
//! - **Bounded retry**: constant backoff, configurable attempt budget
//! - **Cancellable**: Ctrl-C stops between attempts
//! - **Config file**: defaults for URL, trust anchor and retry policy

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
