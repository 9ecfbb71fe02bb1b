use thiserror::Error;

/// Result type alias for NDF operations
pub type Result<T> = std::result::Result<T, NdfError>;

/// Errors that can occur while configuring or running an NDF fetch
#[derive(Error, Debug)]
pub enum NdfError {
    /// Retry policy, target or settings failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The trust anchor could not be resolved or read
    #[error("trust anchor '{reference}' unavailable: {reason}")]
    ResourceUnavailable {
        /// The reference that failed to resolve
        reference: String,
        /// Why it could not be loaded
        reason: String,
    },

    /// The caller's cancellation request was honored
    #[error("fetch cancelled")]
    Cancelled,

    /// Every attempt returned an empty document
    #[error("no network definition after {attempts} attempts")]
    RetriesExhausted {
        /// Number of fetch attempts made
        attempts: u32,
    },

    /// Unknown numeric log level code
    #[error("invalid log level code: {0}")]
    InvalidLogLevel(i32),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl NdfError {
    /// Build a [`NdfError::ResourceUnavailable`] for a trust anchor reference
    pub fn unavailable(reference: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ResourceUnavailable {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the error is the caller's own cancellation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
