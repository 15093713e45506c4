//! Listing-page extraction and pagination.
//!
//! The listing renders proposals as container elements whose `id` attribute
//! is `proposal_` followed by a numeric suffix. Pagination past page 1 is
//! driven entirely by the live DOM: clicking the "next" control mutates
//! which page is rendered, so the crawl tracks its own page counter and only
//! navigates a constructed URL for page 1. Absence of the "next" control is
//! normal termination, not an error.

use std::sync::LazyLock;

use regex::Regex;

use pbharvest_core::AppConfig;

use crate::browser::PageSession;
use crate::dom::compile_selector;
use crate::error::ScrapeError;
use crate::urls::listing_page_url;

/// CSS selector for the clickable "next" affordance on the listing page.
pub const NEXT_PAGE_SELECTOR: &str = r#"li.pagination-next a[rel="next"]"#;

/// Proposal containers are `div.column` elements with ids like `proposal_1234`.
const PROPOSAL_CONTAINER_SELECTOR: &str = r#"div.column[id^="proposal_"]"#;

static PROPOSAL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^proposal_(\d+)$").expect("valid proposal id regex"));

/// Extracts the proposal identifiers present in rendered listing HTML.
///
/// Returns the numeric suffix of every container whose id matches
/// `proposal_<digits>` exactly, in document order. Duplicates are not
/// filtered; ids with a non-numeric suffix do not match.
///
/// # Errors
///
/// Returns [`ScrapeError::Selector`] only if the internal container selector
/// fails to compile.
pub fn extract_proposal_ids(html: &str) -> Result<Vec<String>, ScrapeError> {
    let document = scraper::Html::parse_document(html);
    let container = compile_selector(PROPOSAL_CONTAINER_SELECTOR)?;

    let mut ids = Vec::new();
    for element in document.select(&container) {
        let Some(id_attr) = element.value().attr("id") else {
            continue;
        };
        if let Some(caps) = PROPOSAL_ID_RE.captures(id_attr) {
            ids.push(caps[1].to_owned());
        }
    }
    Ok(ids)
}

/// Crawls the full paginated listing and accumulates every proposal id.
///
/// Navigates the session to the constructed page-1 URL, then loops: extract
/// ids from the current render, probe for the "next" control, click it if
/// present. `config.max_pages` caps the loop so flaky next-detection cannot
/// spin forever.
///
/// # Errors
///
/// - [`ScrapeError::Render`] / [`ScrapeError::Interaction`] — propagated from
///   the session; a broken listing crawl aborts the run.
/// - [`ScrapeError::PageLimit`] — the safety cap was exceeded.
pub fn collect_proposal_ids(
    session: &dyn PageSession,
    config: &AppConfig,
) -> Result<Vec<String>, ScrapeError> {
    let mut ids = Vec::new();
    let mut page = 1usize;

    session.navigate(&listing_page_url(config, 1))?;
    loop {
        if page > config.max_pages {
            return Err(ScrapeError::PageLimit {
                base_url: config.base_url.clone(),
                max_pages: config.max_pages,
            });
        }

        let html = session.content()?;
        let page_ids = extract_proposal_ids(&html)?;
        tracing::debug!(page, count = page_ids.len(), "extracted listing page");
        ids.extend(page_ids);

        if !session.exists(NEXT_PAGE_SELECTOR) {
            break;
        }
        session.click(NEXT_PAGE_SELECTOR)?;
        page += 1;
    }

    tracing::info!(pages = page, proposals = ids.len(), "listing crawl complete");
    Ok(ids)
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
