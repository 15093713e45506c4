use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("browser driver error: {reason}")]
    Browser { reason: String },

    #[error("failed to render {url}: {reason}")]
    Render { url: String, reason: String },

    #[error("failed to interact with \"{selector}\": {reason}")]
    Interaction { selector: String, reason: String },

    #[error("invalid CSS selector \"{selector}\"")]
    Selector { selector: String },

    #[error("proposal {proposal_id}: missing {what}")]
    Parse {
        proposal_id: String,
        what: &'static str,
    },

    #[error("proposal {proposal_id}: {labels} field labels but {values} value containers")]
    FieldPairMismatch {
        proposal_id: String,
        labels: usize,
        values: usize,
    },

    #[error("pagination limit reached for {base_url}: exceeded {max_pages} pages")]
    PageLimit { base_url: String, max_pages: usize },
}
