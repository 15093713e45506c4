//! Detail-page extraction: one rendered proposal page to one flat record.
//!
//! ## Observed markup (Decidim proposal pages)
//!
//! - The proposal title is the page's secondary heading, `h2.heading3`.
//! - The publication timestamp sits in a `span` inside the author metadata
//!   block, `div.author-data__extra`.
//! - Attributes are presented as parallel `dt` label and `dd` value-container
//!   sequences, paired positionally. The pairing assumes equal length and
//!   matching order; a length mismatch is surfaced as a data-quality error
//!   rather than silently zipping short.
//! - Tags live under `ul.tags--list`; a tag link may contain multiple stacked
//!   text nodes of which only the last is the visible label.

use scraper::Html;

use crate::dom::{compile_selector, element_text};
use crate::error::ScrapeError;
use crate::types::{FieldValue, ProposalRecord};

const TITLE_SELECTOR: &str = "h2.heading3";
const DATETIME_SELECTOR: &str = "div.author-data__extra span";
const LABEL_SELECTOR: &str = "dt";
const VALUE_CONTAINER_SELECTOR: &str = "dd";
const TAG_ITEM_SELECTOR: &str = "ul.tags--list li";

/// Parses one rendered proposal detail page into a [`ProposalRecord`].
///
/// Extraction is a pure function of the HTML string: identical input yields
/// an identical record, field order included.
///
/// # Errors
///
/// - [`ScrapeError::Parse`] — the title heading or datetime container is
///   absent. Fatal for this record only, not for the run.
/// - [`ScrapeError::FieldPairMismatch`] — the label and value-container
///   sequences differ in length.
pub fn extract_detail(html: &str, proposal_id: &str) -> Result<ProposalRecord, ScrapeError> {
    let document = Html::parse_document(html);

    let title_sel = compile_selector(TITLE_SELECTOR)?;
    let title = document
        .select(&title_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::Parse {
            proposal_id: proposal_id.to_owned(),
            what: "title heading (h2.heading3)",
        })?;

    let datetime_sel = compile_selector(DATETIME_SELECTOR)?;
    let datetime = document
        .select(&datetime_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::Parse {
            proposal_id: proposal_id.to_owned(),
            what: "publication datetime (div.author-data__extra span)",
        })?;

    let fields = extract_fields(&document, proposal_id)?;
    let tags = extract_tags(&document)?;

    Ok(ProposalRecord {
        proposal_id: proposal_id.to_owned(),
        title,
        datetime,
        fields,
        tags,
    })
}

/// Pairs the document-ordered `dt` labels with the `dd` value containers.
///
/// Per pair: more than one nested `div` yields an ordered [`FieldValue::List`],
/// exactly one yields a scalar [`FieldValue::Text`], none yields an empty
/// string.
fn extract_fields(
    document: &Html,
    proposal_id: &str,
) -> Result<Vec<(String, FieldValue)>, ScrapeError> {
    let label_sel = compile_selector(LABEL_SELECTOR)?;
    let container_sel = compile_selector(VALUE_CONTAINER_SELECTOR)?;
    let div_sel = compile_selector("div")?;

    let labels: Vec<_> = document.select(&label_sel).collect();
    let containers: Vec<_> = document.select(&container_sel).collect();
    if labels.len() != containers.len() {
        return Err(ScrapeError::FieldPairMismatch {
            proposal_id: proposal_id.to_owned(),
            labels: labels.len(),
            values: containers.len(),
        });
    }

    let mut fields = Vec::with_capacity(labels.len());
    for (label, container) in labels.into_iter().zip(containers) {
        let key = element_text(label);
        let values: Vec<String> = container.select(&div_sel).map(element_text).collect();
        let value = match values.len() {
            0 => FieldValue::Text(String::new()),
            1 => FieldValue::Text(values.into_iter().next().unwrap_or_default()),
            _ => FieldValue::List(values),
        };
        fields.push((key, value));
    }
    Ok(fields)
}

/// Collects the visible label of each associated tag.
///
/// A tag link can contain several stacked text nodes (screen-reader prefix
/// plus the display name); only the final newline-delimited segment is the
/// visible label. List items without a link are skipped.
fn extract_tags(document: &Html) -> Result<Vec<String>, ScrapeError> {
    let item_sel = compile_selector(TAG_ITEM_SELECTOR)?;
    let link_sel = compile_selector("a")?;

    let mut tags = Vec::new();
    for item in document.select(&item_sel) {
        let Some(link) = item.select(&link_sel).next() else {
            continue;
        };
        let text = link.text().collect::<String>();
        let label = text
            .trim()
            .split('\n')
            .next_back()
            .unwrap_or("")
            .trim()
            .to_owned();
        tags.push(label);
    }
    Ok(tags)
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
