//! CSV schema listing readers.
//!
//! Source listings carry `table,source_system,field_name,description`
//! headers; target listings carry `table,field_name,description`. Rows
//! missing a field name or description cannot be embedded and are dropped
//! with a count in the log — never an error.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::matching::types::{SourceField, TargetField};

/// Load the source schema listing, dropping incomplete rows.
pub fn load_source_fields(path: impl AsRef<Path>) -> Result<Vec<SourceField>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open source listing: {}", path.display()))?;

    let mut fields = Vec::new();
    let mut dropped = 0usize;
    for row in reader.deserialize() {
        let field: SourceField = row.context("malformed row in source listing")?;
        if is_blank(&field.field_name) || is_blank(&field.description) {
            dropped += 1;
            continue;
        }
        fields.push(field);
    }

    if dropped > 0 {
        warn!(
            dropped,
            kept = fields.len(),
            file = %path.display(),
            "dropped rows with missing field name or description"
        );
    }
    Ok(fields)
}

/// Load the target schema listing, dropping incomplete rows.
pub fn load_target_fields(path: impl AsRef<Path>) -> Result<Vec<TargetField>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open target listing: {}", path.display()))?;

    let mut fields = Vec::new();
    let mut dropped = 0usize;
    for row in reader.deserialize() {
        let field: TargetField = row.context("malformed row in target listing")?;
        if is_blank(&field.field_name) || is_blank(&field.description) {
            dropped += 1;
            continue;
        }
        fields.push(field);
    }

    if dropped > 0 {
        warn!(
            dropped,
            kept = fields.len(),
            file = %path.display(),
            "dropped rows with missing field name or description"
        );
    }
    Ok(fields)
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_complete_source_rows() {
        let file = write_temp(
            "table,source_system,field_name,description\n\
             customers,dwh,cust_id,Customer identifier\n\
             orders,dwh,ord_dt,Order date\n",
        );
        let fields = load_source_fields(file.path()).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_name, "cust_id");
        assert_eq!(fields[1].table, "orders");
    }

    #[test]
    fn drops_rows_missing_mandatory_text() {
        let file = write_temp(
            "table,source_system,field_name,description\n\
             customers,dwh,cust_id,Customer identifier\n\
             customers,dwh,,No name here\n\
             customers,dwh,status,   \n",
        );
        let fields = load_source_fields(file.path()).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_name, "cust_id");
    }

    #[test]
    fn target_listing_has_no_source_system_column() {
        let file = write_temp(
            "table,field_name,description\n\
             client,customer_id,Unique ID of a customer\n",
        );
        let fields = load_target_fields(file.path()).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_name, "customer_id");
    }

    #[test]
    fn header_only_file_yields_empty_listing() {
        let file = write_temp("table,field_name,description\n");
        let fields = load_target_fields(file.path()).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_source_fields("/nonexistent/source.csv").is_err());
    }
}
