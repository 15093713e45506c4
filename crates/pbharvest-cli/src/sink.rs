//! Terminal sinks: a tabular CSV for parsed records and a plain-text list
//! for failed ids.
//!
//! The column set is the union of all record keys: the guaranteed columns
//! first, then every dynamic field label in first-seen order, then `tags`.
//! Multi-valued cells (`FieldValue::List` and `tags`) are written as JSON
//! arrays so they survive a round-trip through the CSV; missing keys become
//! empty cells. No index column is emitted.

use std::fs;
use std::path::Path;

use pbharvest_scraper::{FieldValue, ProposalRecord};

/// Fixed leading columns; dynamic field columns sit between these and `tags`.
const GUARANTEED_COLUMNS: [&str; 3] = ["proposal_id", "title", "datetime"];

/// Serializes the successful records to a CSV file, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if the path is unwritable or serialization fails.
pub fn write_records(path: &Path, records: &[ProposalRecord]) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;

    let dynamic = dynamic_columns(records);
    let mut header: Vec<&str> = GUARANTEED_COLUMNS.to_vec();
    header.extend(dynamic.iter().map(String::as_str));
    header.push("tags");
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.proposal_id.clone(),
            record.title.clone(),
            record.datetime.clone(),
        ];
        for key in &dynamic {
            row.push(match record.field(key) {
                Some(FieldValue::Text(text)) => text.clone(),
                Some(FieldValue::List(items)) => serde_json::to_string(items)?,
                None => String::new(),
            });
        }
        row.push(serde_json::to_string(&record.tags)?);
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the failed proposal ids, one per line with a trailing newline.
///
/// # Errors
///
/// Returns an error if the path is unwritable.
pub fn write_failures(path: &Path, failures: &[String]) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let mut body = failures.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    fs::write(path, body)?;
    Ok(())
}

/// Union of dynamic field labels across all records, in first-seen order.
fn dynamic_columns(records: &[ProposalRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for (key, _) in &record.fields {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod tests;
