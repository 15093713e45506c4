//! Record types produced by the extractors.
//!
//! Proposal pages carry an arbitrary label-driven field set, so
//! [`ProposalRecord`] is an ordered mapping with a small set of guaranteed
//! keys rather than a rigid schema. Field order is document order, which the
//! sink relies on for deterministic column ordering.

use serde::Serialize;

/// Value of one labeled field on a proposal detail page.
///
/// A value container with more than one nested sub-element yields `List`
/// (document order); exactly one yields `Text`; none yields `Text("")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// Flat record parsed from a single proposal detail page.
///
/// Created once at parse time, never mutated. Tabular key order is
/// `proposal_id`, `title`, `datetime`, then the dynamic fields, then `tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalRecord {
    /// Opaque identifier discovered on the listing page.
    pub proposal_id: String,
    /// Trimmed text of the page's secondary heading.
    pub title: String,
    /// Trimmed publication timestamp from the author metadata block.
    pub datetime: String,
    /// Label-driven fields in document order. The key set varies per record.
    pub fields: Vec<(String, FieldValue)>,
    /// Visible labels of the page's associated tags.
    pub tags: Vec<String>,
}

impl ProposalRecord {
    /// Looks up a dynamic field by its label.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Aggregate of one run: successfully parsed records plus the ids that
/// failed to fetch or parse. Held in memory only until the sink writes it.
#[derive(Debug, Default)]
pub struct CollectionResult {
    pub records: Vec<ProposalRecord>,
    pub failures: Vec<String>,
}
