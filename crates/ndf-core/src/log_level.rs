//! Numeric log severity codes.

use crate::{NdfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Log severity, identified by a stable numeric code.
///
/// The codes are what hosts pass around (config files, `--log-level 2`).
/// `Critical` and `Fatal` have no direct `tracing` counterpart and are
/// treated as errors by subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Critical,
    Fatal,
}

impl LogLevel {
    /// All levels in ascending severity
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Critical,
        Self::Fatal,
    ];

    /// Numeric code of this level
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Trace => 0,
            Self::Debug => 1,
            Self::Info => 2,
            Self::Warn => 3,
            Self::Error => 4,
            Self::Critical => 5,
            Self::Fatal => 6,
        }
    }

    /// Look up a level by its numeric code
    pub fn from_code(code: i32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.code() == code)
            .ok_or(NdfError::InvalidLogLevel(code))
    }

    /// Directive usable in a `tracing` env filter
    #[must_use]
    pub const fn as_filter_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error | Self::Critical | Self::Fatal => "error",
        }
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = NdfError;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        level.code()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let codes: Vec<i32> = LogLevel::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(LogLevel::from_code(0).unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_code(3).unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_code(6).unwrap(), LogLevel::Fatal);
    }

    #[test]
    fn test_from_invalid_code() {
        assert!(matches!(
            LogLevel::from_code(7),
            Err(NdfError::InvalidLogLevel(7))
        ));
        assert!(LogLevel::from_code(-1).is_err());
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(LogLevel::Debug.as_filter_directive(), "debug");
        assert_eq!(LogLevel::Critical.as_filter_directive(), "error");
        assert_eq!(LogLevel::Fatal.as_filter_directive(), "error");
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "3");
        let level: LogLevel = serde_json::from_str("1").unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert!(serde_json::from_str::<LogLevel>("42").is_err());
    }
}
