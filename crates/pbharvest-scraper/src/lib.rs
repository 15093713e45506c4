pub mod browser;
pub mod detail;
pub mod error;
pub mod listing;
pub mod pipeline;
pub mod types;
pub mod urls;

mod dom;

pub use browser::{Browser, ChromeBrowser, PageSession};
pub use detail::extract_detail;
pub use error::ScrapeError;
pub use listing::{collect_proposal_ids, extract_proposal_ids};
pub use pipeline::run_collection;
pub use types::{CollectionResult, FieldValue, ProposalRecord};
