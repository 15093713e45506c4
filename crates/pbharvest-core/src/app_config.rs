use std::path::PathBuf;

/// Runtime configuration for a harvest run.
///
/// Loaded from `PBH_*` environment variables by [`crate::load_app_config`].
/// The CLI may override the output paths, throttle delay, and page cap after
/// loading; everything else is fixed for the lifetime of the run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listing base URL for the proposals component, without query parameters
    /// (e.g. `https://example.org/processes/citywide/f/321/proposals`).
    pub base_url: String,
    /// Component id carried in the listing query string.
    pub component_id: String,
    /// Participatory process slug carried in the listing query string.
    pub process_slug: String,
    /// Destination of the tabular proposal export.
    pub output_path: PathBuf,
    /// Destination of the newline-delimited failed-id list.
    pub failed_path: PathBuf,
    /// Courtesy pause after a failed proposal fetch, in milliseconds.
    pub failure_delay_ms: u64,
    /// Safety cap on listing pages crawled before the run aborts.
    pub max_pages: usize,
    /// Navigation wait budget handed to the browser driver, in seconds.
    pub nav_timeout_secs: u64,
    /// Default tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
}
