//! Join ranked candidates back to the original field records.

use tracing::debug;

use super::types::{MatchCandidate, MatchRecord, SourceField, TargetField};

/// Build one [`MatchRecord`] per candidate by positional lookup, then sort
/// the whole collection by combined score descending.
///
/// The sort is global, across all source rows' candidates together, so the
/// report leads with the strongest pairings regardless of which source field
/// they belong to. A candidate whose index does not resolve to a record is
/// skipped, same as in ranking. An empty candidate list produces an empty
/// (not missing) result.
pub fn assemble_matches(
    candidates: &[MatchCandidate],
    sources: &[SourceField],
    targets: &[TargetField],
) -> Vec<MatchRecord> {
    let mut records: Vec<MatchRecord> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let (Some(source), Some(target)) = (
            sources.get(candidate.source_index),
            targets.get(candidate.target_index),
        ) else {
            debug!(
                source = candidate.source_index,
                target = candidate.target_index,
                "candidate refers to a missing record, skipped"
            );
            continue;
        };

        records.push(MatchRecord {
            source_table: source.table.clone(),
            source_system: source.source_system.clone(),
            source_field: source.field_name.clone(),
            target_table: target.table.clone(),
            target_field: target.field_name.clone(),
            description_score: candidate.description_score,
            field_name_score: candidate.field_name_score,
            combined_score: candidate.combined_score,
        });
    }

    records.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    records
}
