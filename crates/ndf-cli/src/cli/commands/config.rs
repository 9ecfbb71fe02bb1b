//! `ndfetch config` - CLI configuration inspection.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Path => show_path(&ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Pretty => {
            let unset = || "(not set)".dimmed().to_string();

            println!("{}", "Current Configuration:".bold());
            println!();
            println!(
                "  {} {}",
                "ndf_url:".bold(),
                config.ndf_url.clone().unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "anchor_dir:".bold(),
                config
                    .anchor_dir
                    .as_ref()
                    .map_or_else(unset, |p| p.display().to_string())
            );
            println!(
                "  {} {}",
                "certificate_ref:".bold(),
                config
                    .certificate_ref
                    .as_ref()
                    .map_or_else(unset, ToString::to_string)
            );

            let retry = config.retry.unwrap_or_default();
            println!(
                "  {} {} retries, {} ms apart",
                "retry:".bold(),
                retry.max_retries(),
                retry.retry_delay().as_millis()
            );
            println!(
                "  {} {}",
                "log_level:".bold(),
                config.log_level.unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => Config::path()?,
    };

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "path": path.display().to_string() }));
        }
        OutputFormat::Pretty => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("{}", "(file does not exist yet)".dimmed());
            }
        }
    }

    Ok(())
}
