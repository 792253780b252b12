//! Pairwise cosine-similarity matrix construction.
//!
//! Builds the dense N×M matrix the ranker consumes. Row order follows the
//! source batch and column order the target batch, so matrices built over
//! different text signals can be combined positionally.

use ndarray::Array2;

use super::MatchError;

/// Cosine similarity of two equal-length vectors.
///
/// Defined as 0.0 when either vector has zero magnitude, so degenerate
/// embeddings never produce NaN or a division by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Build the pairwise cosine matrix between two embedding batches.
///
/// Cell `[i, j]` is the cosine similarity of source vector `i` and target
/// vector `j`. All vectors across both batches must share one dimensionality;
/// a mismatch is a configuration error and is reported before any cell is
/// computed. Empty batches yield an empty (0×M or N×0) matrix.
pub fn similarity_matrix(
    sources: &[Vec<f32>],
    targets: &[Vec<f32>],
) -> Result<Array2<f32>, MatchError> {
    check_dimensions(sources, targets)?;

    let mut matrix = Array2::zeros((sources.len(), targets.len()));
    for (i, source) in sources.iter().enumerate() {
        for (j, target) in targets.iter().enumerate() {
            matrix[[i, j]] = cosine_similarity(source, target);
        }
    }
    Ok(matrix)
}

/// Verify that every vector in both batches has the same dimensionality.
fn check_dimensions(sources: &[Vec<f32>], targets: &[Vec<f32>]) -> Result<(), MatchError> {
    let expected = match sources.first().or_else(|| targets.first()) {
        Some(v) => v.len(),
        None => return Ok(()),
    };
    for vector in sources.iter().chain(targets.iter()) {
        if vector.len() != expected {
            return Err(MatchError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
    }
    Ok(())
}
