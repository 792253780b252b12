//! Record and parameter types for the matching engine.
//!
//! Defines the input snapshots ([`SourceField`], [`TargetField`]), the
//! intermediate [`MatchCandidate`] produced by ranking, the output
//! [`MatchRecord`], and the explicit [`MatchParams`] knob set.

use serde::{Deserialize, Serialize};

/// One field of the source schema, as loaded from the source listing.
///
/// `field_name` and `description` are mandatory: the loader drops rows
/// missing either before they reach the matching engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceField {
    /// Table the field belongs to.
    pub table: String,
    /// Originating system (e.g. a warehouse or application name).
    pub source_system: String,
    /// Technical field name, e.g. `cust_id`.
    pub field_name: String,
    /// Natural-language description of the field.
    pub description: String,
}

/// One field of the target schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetField {
    pub table: String,
    pub field_name: String,
    pub description: String,
}

/// A ranked pairing of a source row with a target row, by batch index.
///
/// Indices refer to the positions of the records in the input batches, which
/// are also the axes of the similarity matrices. Candidates exist only
/// between ranking and assembly; they are never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub source_index: usize,
    pub target_index: usize,
    pub description_score: f32,
    pub field_name_score: f32,
    pub combined_score: f32,
}

/// One row of the match report: the joined source/target fields plus the
/// three similarity scores. Sorted globally by `combined_score` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub source_table: String,
    pub source_system: String,
    pub source_field: String,
    pub target_table: String,
    pub target_field: String,
    pub description_score: f32,
    pub field_name_score: f32,
    pub combined_score: f32,
}

/// Weights and threshold for one matching run, passed explicitly into the
/// scorer.
///
/// The weights are a free linear blend: they are not required to sum to 1.0,
/// and when they don't, combined scores may leave the nominal `[-1, 1]`
/// cosine range. Suggested values: 0.7 / 0.3, threshold 0.5 to 0.6.
#[derive(Debug, Clone, Copy)]
pub struct MatchParams {
    pub desc_weight: f32,
    pub field_weight: f32,
    pub threshold: f32,
}

impl MatchParams {
    /// Combine the two raw similarity signals into one score.
    pub fn combine(&self, description_score: f32, field_name_score: f32) -> f32 {
        self.desc_weight * description_score + self.field_weight * field_name_score
    }
}
