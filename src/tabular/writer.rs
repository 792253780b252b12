//! CSV match-report writer.

use std::path::Path;

use anyhow::{Context, Result};

use crate::matching::types::MatchRecord;

/// Write the match report to `path`.
///
/// The header row is always written, so a run with zero matches still
/// produces a valid, empty report rather than no file.
pub fn write_matches(path: impl AsRef<Path>, records: &[MatchRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create report file: {}", path.display()))?;

    if records.is_empty() {
        // serde-derived headers are only emitted alongside a record, so
        // write them by hand for the empty report.
        writer.write_record([
            "source_table",
            "source_system",
            "source_field",
            "target_table",
            "target_field",
            "description_score",
            "field_name_score",
            "combined_score",
        ])?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush report file: {}", path.display()))?;
    Ok(())
}
