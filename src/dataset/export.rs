//! Cleaned dataset export.
//!
//! Values are written without quoting, so a field containing a comma
//! shifts the columns after it. Consumers that need round-trippable output
//! should use the JSON report instead.

use crate::models::{CleanRecord, COLUMNS};
use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::path::Path;
use tracing::info;

/// Serialize cleaned records with a header row, one record per line.
pub fn to_csv_string(records: &[CleanRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV export: {}", e.error()))?;

    String::from_utf8(bytes).context("CSV export is not valid UTF-8")
}

/// Write cleaned records to a file.
pub fn write_cleaned_csv(records: &[CleanRecord], path: &Path) -> Result<()> {
    let content = to_csv_string(records)?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write cleaned CSV to {}", path.display()))?;

    info!("Exported {} cleaned rows to {}", records.len(), path.display());
    Ok(())
}
