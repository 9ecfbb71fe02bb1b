//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use ndf::LogLevel;

use crate::config::Config;
use crate::logging;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // CLI flag wins over config file
    let log_level = match cli.log_level {
        Some(code) => LogLevel::from_code(code)?,
        None => config.log_level.unwrap_or_default(),
    };
    logging::init(log_level);

    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Create context for commands
    let ctx = commands::Context {
        config,
        config_path: cli.config,
        output_format,
        no_color: cli.no_color,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Fetch(args) => commands::fetch::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}
