//! Blended scoring and per-row candidate ranking.
//!
//! Takes the two similarity matrices (descriptions, field names), blends them
//! with the configured weights, and walks each source row's targets in
//! descending combined-score order. The walk stops at the first entry below
//! the threshold: everything after it on the sorted row is weaker, so the
//! cutoff is a short-circuit rather than a filter. The sorted order is
//! authoritative; candidates past the cutoff are never revisited.

use ndarray::Array2;
use tracing::debug;

use super::types::{MatchCandidate, MatchParams};

/// Rank all above-threshold target candidates for every source row.
///
/// Returns candidates grouped by source row, each group in descending
/// combined-score order. Ties keep ascending target-index order (stable
/// sort), so identical inputs always produce identical output. A source row
/// whose best candidate is already below threshold contributes nothing.
///
/// The two matrices must share their shape and index convention. A target
/// index outside the target batch range is skipped, never reported as an
/// error.
pub fn rank_candidates(
    desc_matrix: &Array2<f32>,
    name_matrix: &Array2<f32>,
    target_count: usize,
    params: &MatchParams,
) -> Vec<MatchCandidate> {
    let (rows, cols) = desc_matrix.dim();
    let mut candidates = Vec::new();

    for i in 0..rows {
        let desc_row = desc_matrix.row(i);
        let name_row = name_matrix.row(i);

        let combined: Vec<f32> = desc_row
            .iter()
            .zip(name_row.iter())
            .map(|(&d, &f)| params.combine(d, f))
            .collect();

        // Stable descending sort: equal scores keep ascending index order.
        let mut order: Vec<usize> = (0..cols).collect();
        order.sort_by(|&a, &b| {
            combined[b]
                .partial_cmp(&combined[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for j in order {
            let combined_score = combined[j];
            // Sorted descending, so everything past this point is weaker.
            if combined_score < params.threshold {
                break;
            }
            if j >= target_count {
                debug!(source = i, target = j, "candidate index outside target batch, skipped");
                continue;
            }
            candidates.push(MatchCandidate {
                source_index: i,
                target_index: j,
                description_score: desc_row[j],
                field_name_score: name_row[j],
                combined_score,
            });
        }
    }

    candidates
}
