//! Tracing subscriber setup.

use ndf::LogLevel;
use tracing_subscriber::EnvFilter;

/// Build the filter for `level`, letting `RUST_LOG` take precedence.
pub fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_directive()))
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for the fetched document.
pub fn init(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
