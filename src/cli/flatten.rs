//! CLI `flatten` command — YAML schema definitions to a flat CSV listing.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::flatten;

/// Flatten a YAML schema file. The output path defaults to
/// `<info.title>.csv` in the current directory.
pub fn flatten(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let document = flatten::parse_schema(input)?;
    let output = output.unwrap_or_else(|| flatten::default_output_path(&document));

    let rows = flatten::flatten_definitions(&document);
    flatten::write_rows(&output, &rows)?;

    println!(
        "Flattened {} field(s) from {} into {}",
        rows.len(),
        input.display(),
        output.display()
    );
    Ok(())
}
