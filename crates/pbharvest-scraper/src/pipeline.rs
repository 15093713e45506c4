//! Sequential crawl-then-extract pipeline.
//!
//! One session drives the whole listing crawl; each detail page then gets a
//! fresh session so a wedged page cannot poison later fetches. Per-proposal
//! failures are logged and recorded, never propagated — the run is strictly
//! best-effort once the id list exists.

use std::thread;
use std::time::Duration;

use pbharvest_core::AppConfig;

use crate::browser::Browser;
use crate::detail::extract_detail;
use crate::error::ScrapeError;
use crate::listing::collect_proposal_ids;
use crate::types::{CollectionResult, ProposalRecord};
use crate::urls::detail_url;

/// Runs one full collection: discover every proposal id from the paginated
/// listing, then fetch and parse each detail page.
///
/// Every discovered id ends up in exactly one of `records` or `failures`.
/// A configurable courtesy pause follows each failure before the next fetch;
/// no retries are attempted.
///
/// # Errors
///
/// Only setup-stage failures abort the run: the browser cannot allocate the
/// listing session, the listing crawl itself breaks, or the page cap is
/// exceeded. Per-proposal errors are recorded in the result instead.
pub fn run_collection(
    browser: &dyn Browser,
    config: &AppConfig,
) -> Result<CollectionResult, ScrapeError> {
    let listing_session = browser.open_session()?;
    let ids = collect_proposal_ids(listing_session.as_ref(), config)?;
    drop(listing_session);

    let mut result = CollectionResult::default();
    for id in ids {
        let url = detail_url(&config.base_url, &id);
        tracing::info!(proposal_id = %id, %url, "fetching proposal");
        match fetch_proposal(browser, &url, &id) {
            Ok(record) => result.records.push(record),
            Err(e) => {
                tracing::warn!(proposal_id = %id, error = %e, "proposal fetch failed");
                result.failures.push(id);
                if config.failure_delay_ms > 0 {
                    thread::sleep(Duration::from_millis(config.failure_delay_ms));
                }
            }
        }
    }

    tracing::info!(
        succeeded = result.records.len(),
        failed = result.failures.len(),
        "collection run complete"
    );
    Ok(result)
}

/// Fetches and parses a single proposal in a fresh session.
fn fetch_proposal(
    browser: &dyn Browser,
    url: &str,
    proposal_id: &str,
) -> Result<ProposalRecord, ScrapeError> {
    let session = browser.open_session()?;
    session.navigate(url)?;
    let html = session.content()?;
    extract_detail(&html, proposal_id)
}
