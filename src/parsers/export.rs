use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::models::RawConversation;
use crate::utils::open_export_file;

/// Parse a conversation export file (a JSON array of conversation records)
///
/// Records that fail to decode are logged and skipped. Returns an error if the
/// file cannot be read, is not a JSON array, or more than 50% of records fail.
pub fn parse_export_file(path: &Path) -> Result<Vec<RawConversation>> {
    let file = open_export_file(path)?;
    parse_export_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse export file: {}", path.display()))
}

/// Parse an export from any reader; see [`parse_export_file`]
pub fn parse_export_reader<R: Read>(reader: R) -> Result<Vec<RawConversation>> {
    let value: Value = serde_json::from_reader(reader).context("Invalid JSON in export")?;
    let Value::Array(items) = value else {
        bail!("Export must be a JSON array of conversations");
    };

    let total = items.len();
    let mut records = Vec::with_capacity(total);
    let mut skipped_count = 0;

    for (position, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RawConversation>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("Skipping export record {}: {}", position, e);
                skipped_count += 1;
            }
        }
    }

    // Check if failure rate is too high
    if total > 0 {
        let failure_rate = (skipped_count as f64) / (total as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many malformed records in export: {} of {} failed ({:.1}%)",
                skipped_count,
                total,
                failure_rate * 100.0
            );
        }
    }

    if skipped_count > 0 {
        log::info!("Parsed export: {} records ({} skipped)", records.len(), skipped_count);
    }

    Ok(records)
}
