//! Core matching engine: similarity matrices, blended ranking, and assembly.
//!
//! The entry point is [`match_fields`], which drives the full run:
//!
//! 1. Embed both text signals — descriptions and field names — in one
//!    provider batch call per signal.
//! 2. Build a pairwise cosine matrix per signal ([`similarity`]).
//! 3. Blend, rank, and threshold-cut candidates per source row ([`rank`]).
//! 4. Join candidates back to records and sort globally ([`assemble`]).
//!
//! The engine holds no state between runs and reads no ambient
//! configuration: weights and threshold arrive as an explicit
//! [`MatchParams`](types::MatchParams).

pub mod assemble;
pub mod rank;
pub mod similarity;
pub mod types;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

use crate::embedding::EmbeddingProvider;
pub use types::{MatchCandidate, MatchParams, MatchRecord, SourceField, TargetField};

/// Fatal matching-stage failures. Both variants abort the run before any
/// candidate is produced; per-candidate anomalies are handled (skipped)
/// inside ranking and assembly instead.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Source and target embeddings disagree on vector dimensionality.
    #[error("embedding dimensionality mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The embedding provider returned a different number of vectors than
    /// texts it was given; the batch contract is order- and length-preserving.
    #[error("embedding batch length mismatch: sent {sent} texts, received {received} vectors")]
    BatchLengthMismatch { sent: usize, received: usize },
}

/// Run the full matching pipeline over two schema listings.
///
/// Embeds all texts of one category in a single provider call (source and
/// target concatenated), so a run costs at most two batch calls. Empty
/// source or target input short-circuits to an empty result. Provider and
/// dimensionality failures abort the run with no partial output.
pub fn match_fields(
    provider: &dyn EmbeddingProvider,
    sources: &[SourceField],
    targets: &[TargetField],
    params: &MatchParams,
) -> Result<Vec<MatchRecord>> {
    if sources.is_empty() || targets.is_empty() {
        info!(
            sources = sources.len(),
            targets = targets.len(),
            "nothing to match"
        );
        return Ok(Vec::new());
    }

    // 1. Embed each text signal in one batch call across both schemas.
    let descriptions: Vec<&str> = sources
        .iter()
        .map(|f| f.description.as_str())
        .chain(targets.iter().map(|f| f.description.as_str()))
        .collect();
    let names: Vec<&str> = sources
        .iter()
        .map(|f| f.field_name.as_str())
        .chain(targets.iter().map(|f| f.field_name.as_str()))
        .collect();

    let (source_desc, target_desc) = embed_split(provider, &descriptions, sources.len())
        .context("embedding descriptions failed")?;
    let (source_name, target_name) =
        embed_split(provider, &names, sources.len()).context("embedding field names failed")?;

    info!(
        sources = sources.len(),
        targets = targets.len(),
        dimensions = source_desc.first().map(|v| v.len()).unwrap_or(0),
        "embeddings computed"
    );

    // 2. One similarity matrix per signal, same index convention.
    let desc_matrix = similarity::similarity_matrix(&source_desc, &target_desc)?;
    let name_matrix = similarity::similarity_matrix(&source_name, &target_name)?;

    // 3. Blend, rank, cut.
    let candidates = rank::rank_candidates(&desc_matrix, &name_matrix, targets.len(), params);
    info!(candidates = candidates.len(), "ranking complete");

    // 4. Join and globally sort.
    Ok(assemble::assemble_matches(&candidates, sources, targets))
}

/// Embed one batch of texts and split the result at `boundary` into the
/// source and target halves, verifying the provider honored batch length.
fn embed_split(
    provider: &dyn EmbeddingProvider,
    texts: &[&str],
    boundary: usize,
) -> Result<(Vec<Vec<f32>>, Vec<Vec<f32>>)> {
    let mut vectors = provider.embed_batch(texts)?;
    if vectors.len() != texts.len() {
        return Err(MatchError::BatchLengthMismatch {
            sent: texts.len(),
            received: vectors.len(),
        }
        .into());
    }
    let targets = vectors.split_off(boundary);
    Ok((vectors, targets))
}
