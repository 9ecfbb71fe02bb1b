//! `ndfetch fetch` - Download and verify the NDF.

use anyhow::{Context as _, Result};
use colored::Colorize;
use ndf::{
    CancellationToken, FetchReport, FileTrustAnchorSource, HttpVerifiedFetch, Ndf, NdfFetcher,
    NdfSettings, RetryPolicy,
};
use std::path::PathBuf;
use tracing::{debug, info};

use super::Context;
use crate::cli::args::FetchArgs;
use crate::output::OutputFormat;

/// Fully resolved inputs for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub settings: NdfSettings,
    pub anchor_dir: PathBuf,
}

/// Merge CLI arguments over the config file.
pub fn plan(ctx: &Context, args: &FetchArgs) -> Result<FetchPlan> {
    let config = &ctx.config;

    let url = args
        .url
        .clone()
        .or_else(|| config.ndf_url.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "NDF URL required.\n\n\
                 Set it with one of:\n  \
                 1. --url <URL>\n  \
                 2. NDF_URL environment variable\n  \
                 3. ndf_url in the config file"
            )
        })?;

    let certificate_ref = args
        .anchor
        .clone()
        .map(Into::into)
        .or_else(|| config.certificate_ref.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Trust anchor required.\n\n\
                 Set it with --anchor <FILE> or certificate_ref in the config file"
            )
        })?;

    let anchor_dir = args
        .anchor_dir
        .clone()
        .or_else(|| config.anchor_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let base = config.retry.unwrap_or_default();
    let retry = match (args.max_retries, args.retry_delay_ms) {
        (None, None) => base,
        (max_retries, retry_delay_ms) => {
            let base_delay_ms = i64::try_from(base.retry_delay().as_millis()).unwrap_or(i64::MAX);
            RetryPolicy::from_raw(
                max_retries.unwrap_or_else(|| i64::from(base.max_retries())),
                retry_delay_ms.unwrap_or(base_delay_ms),
            )?
        }
    };

    let settings = NdfSettings::new(url, certificate_ref).with_retry(retry);
    settings.target()?;

    Ok(FetchPlan {
        settings,
        anchor_dir,
    })
}

pub async fn execute(ctx: Context, args: FetchArgs) -> Result<()> {
    let plan = plan(&ctx, &args)?;
    debug!(?plan, "resolved fetch plan");

    let fetcher = NdfFetcher::builder_from_settings(
        &plan.settings,
        FileTrustAnchorSource::new(&plan.anchor_dir),
        HttpVerifiedFetch::new()?,
    )?
    .build();

    // Ctrl-C cancels between attempts
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt_guard = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, cancelling fetch");
            on_interrupt.cancel();
        }
    });

    let result = if args.strict {
        fetcher.fetch_ndf_strict(&cancel).await.map(Fetched::Document)
    } else {
        fetcher.fetch_ndf_report(&cancel).await.map(Fetched::Report)
    };
    interrupt_guard.abort();

    let fetched = match result {
        Ok(fetched) => fetched,
        Err(e) if e.is_cancelled() => anyhow::bail!("Fetch cancelled"),
        Err(e) => return Err(e.into()),
    };

    // Without --strict an exhausted fetch is a warning, not a failure
    if let Fetched::Report(report) = &fetched {
        if report.exhausted {
            print_exhausted(&ctx, report)?;
            return Ok(());
        }
    }

    if let Some(path) = &args.out {
        std::fs::write(path, fetched.ndf().as_str())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    print_fetched(&ctx, &fetched, args.out.is_some())
}

/// What a fetch produced: a full report, or just the document under `--strict`.
enum Fetched {
    Report(FetchReport),
    Document(Ndf),
}

impl Fetched {
    const fn ndf(&self) -> &Ndf {
        match self {
            Self::Report(report) => &report.ndf,
            Self::Document(ndf) => ndf,
        }
    }
}

fn print_fetched(ctx: &Context, fetched: &Fetched, written_to_file: bool) -> Result<()> {
    let ndf = fetched.ndf();

    match ctx.output_format {
        OutputFormat::Json => {
            let json = match fetched {
                Fetched::Report(report) => serde_json::to_value(report)?,
                Fetched::Document(ndf) => serde_json::json!({ "ndf": ndf }),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Pretty => {
            if !written_to_file {
                println!("{ndf}");
            }
            let summary = match fetched {
                Fetched::Report(report) => format!(
                    "Verified NDF ({} bytes) after {} attempt(s)",
                    ndf.len(),
                    report.attempts
                ),
                Fetched::Document(_) => format!("Verified NDF ({} bytes)", ndf.len()),
            };
            if ctx.no_color {
                eprintln!("{summary}");
            } else {
                eprintln!("{}", summary.green().bold());
            }
        }
    }

    Ok(())
}

fn print_exhausted(ctx: &Context, report: &FetchReport) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Pretty => {
            let msg = format!(
                "No NDF available after {} attempt(s); the endpoint returned nothing that verified",
                report.attempts
            );
            if ctx.no_color {
                eprintln!("Warning: {msg}");
            } else {
                eprintln!("{} {msg}", "Warning:".yellow().bold());
            }
        }
    }

    Ok(())
}
