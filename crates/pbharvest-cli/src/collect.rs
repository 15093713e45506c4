//! The `collect` command: crawl, extract, write.

use std::path::PathBuf;

use clap::Args;

use pbharvest_core::AppConfig;
use pbharvest_scraper::{collect_proposal_ids, run_collection, Browser, ChromeBrowser};

use crate::sink;

#[derive(Debug, Args)]
pub struct CollectArgs {
    /// Destination of the tabular proposal export
    #[arg(long)]
    output: Option<PathBuf>,

    /// Destination of the failed-id list
    #[arg(long)]
    failed: Option<PathBuf>,

    /// Pause after a failed proposal fetch, in milliseconds
    #[arg(long)]
    failure_delay_ms: Option<u64>,

    /// Safety cap on listing pages crawled
    #[arg(long)]
    max_pages: Option<usize>,

    /// Only crawl the listing and print the discovered ids; skip detail pages
    #[arg(long)]
    ids_only: bool,
}

/// Runs a full collection (or an `--ids-only` listing crawl) and writes the
/// sink files.
///
/// # Errors
///
/// Returns an error on setup failures: missing Chrome binary, a broken
/// listing crawl, the page cap, or an unwritable output path. Per-proposal
/// fetch/parse failures land in the failed-id list instead.
pub fn run_collect(mut config: AppConfig, args: &CollectArgs) -> anyhow::Result<()> {
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if let Some(failed) = &args.failed {
        config.failed_path = failed.clone();
    }
    if let Some(delay) = args.failure_delay_ms {
        config.failure_delay_ms = delay;
    }
    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages;
    }

    let browser = ChromeBrowser::launch(config.nav_timeout_secs)?;
    tracing::info!(base_url = %config.base_url, "browser launched, starting crawl");

    if args.ids_only {
        let session = browser.open_session()?;
        let ids = collect_proposal_ids(session.as_ref(), &config)?;
        for id in &ids {
            println!("{id}");
        }
        println!("discovered {} proposals", ids.len());
        return Ok(());
    }

    let result = run_collection(&browser, &config)?;

    sink::write_records(&config.output_path, &result.records)?;
    sink::write_failures(&config.failed_path, &result.failures)?;

    println!(
        "exported {} proposals to {} ({} failed, see {})",
        result.records.len(),
        config.output_path.display(),
        result.failures.len(),
        config.failed_path.display()
    );
    Ok(())
}
