//! CLI `map` command — run the full matching pipeline between two schema
//! listings and write the match report.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::FieldmapConfig;
use crate::matching::{self, MatchParams};
use crate::tabular::{reader, writer};

/// Weights and threshold for a `map` invocation; each flag falls back to the
/// config default when not given on the command line.
pub struct MapOptions {
    pub desc_weight: Option<f32>,
    pub field_weight: Option<f32>,
    pub threshold: Option<f32>,
}

impl MapOptions {
    fn resolve(&self, config: &FieldmapConfig) -> MatchParams {
        MatchParams {
            desc_weight: self.desc_weight.unwrap_or(config.matching.desc_weight),
            field_weight: self.field_weight.unwrap_or(config.matching.field_weight),
            threshold: self.threshold.unwrap_or(config.matching.threshold),
        }
    }
}

/// Load both listings, match, and write the report.
pub async fn map(
    config: &FieldmapConfig,
    source_path: &Path,
    target_path: &Path,
    output_path: &Path,
    options: &MapOptions,
) -> Result<()> {
    let params = options.resolve(config);

    let sources = reader::load_source_fields(source_path)
        .context("loading source listing failed")?;
    let targets = reader::load_target_fields(target_path)
        .context("loading target listing failed")?;

    println!(
        "Matching {} source fields against {} target fields \
         (weights {:.2}/{:.2}, threshold {:.2})...",
        sources.len(),
        targets.len(),
        params.desc_weight,
        params.field_weight,
        params.threshold,
    );

    let provider = crate::embedding::create_provider(&config.embedding)
        .context("creating embedding provider failed")?;
    let provider: Arc<dyn crate::embedding::EmbeddingProvider> = Arc::from(provider);

    // Inference is CPU-bound and synchronous; keep it off the async runtime.
    let records = tokio::task::spawn_blocking(move || {
        matching::match_fields(provider.as_ref(), &sources, &targets, &params)
    })
    .await?
    .context("matching failed")?;

    writer::write_matches(output_path, &records).context("writing report failed")?;

    println!(
        "Found {} match(es). Report written to {}",
        records.len(),
        output_path.display()
    );
    if let Some(best) = records.first() {
        println!(
            "Best pairing: {}.{} -> {}.{} (combined {:.4})",
            best.source_table,
            best.source_field,
            best.target_table,
            best.target_field,
            best.combined_score,
        );
    }

    Ok(())
}
