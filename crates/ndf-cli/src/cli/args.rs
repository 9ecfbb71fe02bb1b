//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Fetch a signed network definition (NDF)
///
/// Downloads the NDF, verifies its signature against a pinned trust anchor
/// and retries with a constant delay while the endpoint serves nothing.
#[derive(Parser, Debug)]
#[command(name = "ndfetch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "NDFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level code: 0 trace, 1 debug, 2 info, 3 warn, 4 error, 5 critical, 6 fatal
    #[arg(short, long, global = true)]
    pub log_level: Option<i32>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and verify the NDF
    Fetch(FetchArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Fetch command
// ============================================================================

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// NDF endpoint URL
    #[arg(short, long, env = "NDF_URL")]
    pub url: Option<String>,

    /// Directory containing trust anchors
    #[arg(long)]
    pub anchor_dir: Option<PathBuf>,

    /// Trust anchor file name inside the anchor directory
    #[arg(short, long)]
    pub anchor: Option<String>,

    /// Retries after the first empty response
    #[arg(long, allow_negative_numbers = true)]
    pub max_retries: Option<i64>,

    /// Delay between attempts in milliseconds
    #[arg(long, allow_negative_numbers = true)]
    pub retry_delay_ms: Option<i64>,

    /// Exit with an error when every attempt comes back empty
    #[arg(long)]
    pub strict: bool,

    /// Write the document to a file instead of stdout
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from([
            "ndfetch",
            "--log-level",
            "1",
            "fetch",
            "--url",
            "https://ndf.example.org/ndf.json",
            "--anchor",
            "mainnet.key",
            "--max-retries",
            "2",
            "--retry-delay-ms",
            "100",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.log_level, Some(1));
        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.url.as_deref(), Some("https://ndf.example.org/ndf.json"));
        assert_eq!(args.anchor.as_deref(), Some("mainnet.key"));
        assert_eq!(args.max_retries, Some(2));
        assert_eq!(args.retry_delay_ms, Some(100));
        assert!(args.strict);
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli = Cli::try_parse_from(["ndfetch", "fetch", "--max-retries", "-1"]).unwrap();
        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.max_retries, Some(-1));
    }
}
