//! Retry policy for NDF fetches.

use crate::{NdfError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// How many times an empty NDF is retried and how long to wait in between.
///
/// A policy is a plain value: it never changes after construction and can be
/// shared by any number of concurrent fetches. The delay is constant, there
/// is no exponential growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRetryPolicy", into = "RawRetryPolicy")]
pub struct RetryPolicy {
    max_retries: u32,
    retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY)
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    #[must_use]
    pub const fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// A policy that makes a single attempt and never waits
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Build a policy from untrusted signed values, such as a config file.
    ///
    /// Fails with [`NdfError::InvalidConfiguration`] if either value is
    /// negative or `max_retries` does not fit in a `u32`.
    pub fn from_raw(max_retries: i64, retry_delay_ms: i64) -> Result<Self> {
        if max_retries < 0 {
            return Err(NdfError::InvalidConfiguration(format!(
                "max_retries must be non-negative, got {max_retries}"
            )));
        }
        if retry_delay_ms < 0 {
            return Err(NdfError::InvalidConfiguration(format!(
                "retry_delay_ms must be non-negative, got {retry_delay_ms}"
            )));
        }

        let max_retries = u32::try_from(max_retries).map_err(|_| {
            NdfError::InvalidConfiguration(format!("max_retries too large: {max_retries}"))
        })?;
        let retry_delay = Duration::from_millis(retry_delay_ms.unsigned_abs());

        Ok(Self::new(max_retries, retry_delay))
    }

    /// Set maximum retries
    #[must_use]
    pub const fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set the delay between attempts
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Number of retries after the first attempt
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Constant delay between two attempts
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Total attempt budget: the first attempt plus every retry
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Wire shape of a [`RetryPolicy`] in config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRetryPolicy {
    #[serde(default = "default_max_retries")]
    max_retries: i64,
    #[serde(default = "default_retry_delay_ms")]
    retry_delay_ms: i64,
}

impl TryFrom<RawRetryPolicy> for RetryPolicy {
    type Error = NdfError;

    fn try_from(raw: RawRetryPolicy) -> Result<Self> {
        Self::from_raw(raw.max_retries, raw.retry_delay_ms)
    }
}

impl From<RetryPolicy> for RawRetryPolicy {
    fn from(policy: RetryPolicy) -> Self {
        Self {
            max_retries: i64::from(policy.max_retries),
            retry_delay_ms: i64::try_from(policy.retry_delay.as_millis()).unwrap_or(i64::MAX),
        }
    }
}

fn default_max_retries() -> i64 {
    i64::from(DEFAULT_MAX_RETRIES)
}

fn default_retry_delay_ms() -> i64 {
    i64::try_from(DEFAULT_RETRY_DELAY.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.retry_delay(), Duration::from_secs(1));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn test_none_policy() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.retry_delay(), Duration::ZERO);
    }

    #[test]
    fn test_from_raw_accepts_zero() {
        let policy = RetryPolicy::from_raw(0, 0).unwrap();
        assert_eq!(policy, RetryPolicy::none());
    }

    #[test]
    fn test_from_raw_rejects_negative_retries() {
        let err = RetryPolicy::from_raw(-1, 100).unwrap_err();
        assert!(matches!(err, NdfError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_raw_rejects_negative_delay() {
        let err = RetryPolicy::from_raw(2, -100).unwrap_err();
        assert!(matches!(err, NdfError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_raw_rejects_overflow() {
        let err = RetryPolicy::from_raw(i64::from(u32::MAX) + 1, 0).unwrap_err();
        assert!(matches!(err, NdfError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_max_attempts_saturates() {
        let policy = RetryPolicy::new(u32::MAX, Duration::ZERO);
        assert_eq!(policy.max_attempts(), u32::MAX);
    }

    #[test]
    fn test_builder_methods() {
        let policy = RetryPolicy::none()
            .with_max_retries(5)
            .with_retry_delay(Duration::from_millis(250));
        assert_eq!(policy.max_retries(), 5);
        assert_eq!(policy.retry_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_serde_shape() {
        let policy = RetryPolicy::new(2, Duration::from_millis(100));
        let json = serde_json::to_value(policy).unwrap();
        assert_eq!(json["max_retries"], 2);
        assert_eq!(json["retry_delay_ms"], 100);
    }

    #[test]
    fn test_deserialize_defaults_and_validation() {
        let policy: RetryPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, RetryPolicy::default());

        let policy: RetryPolicy = serde_json::from_str(r#"{"max_retries": 0}"#).unwrap();
        assert_eq!(policy.max_retries(), 0);

        let result: std::result::Result<RetryPolicy, _> =
            serde_json::from_str(r#"{"retry_delay_ms": -5}"#);
        assert!(result.is_err());
    }
}
