//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use ndf::{LogLevel, RetryPolicy, TrustAnchorRef};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// NDF endpoint.
    pub ndf_url: Option<String>,

    /// Directory trust anchors are read from.
    pub anchor_dir: Option<PathBuf>,

    /// Trust anchor file name inside `anchor_dir`.
    pub certificate_ref: Option<TrustAnchorRef>,

    /// Default retry policy.
    pub retry: Option<RetryPolicy>,

    /// Default log level code (0 = trace ... 6 = fatal).
    pub log_level: Option<LogLevel>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "elixxir", "ndfetch")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/tmp/nonexistent_ndfetch_config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_full_config() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmpfile,
            r#"
            ndf_url = "https://ndf.example.org/mainnet.json"
            anchor_dir = "/etc/ndf"
            certificate_ref = "mainnet.key"
            log_level = 1
            output_format = "json"

            [retry]
            max_retries = 2
            retry_delay_ms = 100
            "#
        )
        .unwrap();

        let config = Config::load_from(tmpfile.path()).unwrap();
        assert_eq!(config.ndf_url.as_deref(), Some("https://ndf.example.org/mainnet.json"));
        assert_eq!(config.anchor_dir, Some(PathBuf::from("/etc/ndf")));
        assert_eq!(config.certificate_ref, Some(TrustAnchorRef::from("mainnet.key")));
        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        assert_eq!(config.retry, Some(RetryPolicy::new(2, Duration::from_millis(100))));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmpfile, "log_level = 9").unwrap();

        assert!(Config::load_from(tmpfile.path()).is_err());
    }

    #[test]
    fn test_negative_retry_rejected() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[retry]\nretry_delay_ms = -1").unwrap();

        assert!(Config::load_from(tmpfile.path()).is_err());
    }
}
