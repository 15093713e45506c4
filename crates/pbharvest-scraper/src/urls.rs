//! URL construction for the listing and detail pages.

use pbharvest_core::AppConfig;

/// Builds the addressable listing URL for a given 1-based page number.
///
/// Only page 1 is normally navigated to directly; later pages are reached by
/// clicking the in-page "next" control. The constructed form is kept general
/// so a crawl can be resumed at an arbitrary page by hand if needed.
#[must_use]
pub fn listing_page_url(config: &AppConfig, page: usize) -> String {
    format!(
        "{}?component_id={}&page={}&participatory_process_slug={}",
        config.base_url, config.component_id, page, config.process_slug
    )
}

/// Builds the detail-page URL for one proposal: `{base_url}/{proposal_id}`.
#[must_use]
pub fn detail_url(base_url: &str, proposal_id: &str) -> String {
    format!("{}/{proposal_id}", base_url.trim_end_matches('/'))
}
