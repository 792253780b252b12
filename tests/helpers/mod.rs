#![allow(dead_code)]

use std::collections::HashMap;

use anyhow::Result;
use fieldmap::embedding::EmbeddingProvider;
use fieldmap::matching::types::{SourceField, TargetField};

/// Dimensionality used by the test vectors. Small on purpose — the matching
/// engine never assumes the production model's 384 dimensions.
pub const DIMS: usize = 8;

/// Generate a deterministic embedding with a unit spike at position `seed`.
/// Distinct seeds produce mutually orthogonal vectors.
pub fn spike(seed: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; DIMS];
    v[seed % DIMS] = 1.0;
    v
}

/// A normalized blend of two spike directions. `weight` close to 1.0 gives a
/// vector nearly parallel to `spike(a)`, so its cosine with that spike is
/// close to (and controllable via) `weight`.
pub fn blend(a: usize, b: usize, weight: f32) -> Vec<f32> {
    let mut v = vec![0.0f32; DIMS];
    v[a % DIMS] = weight;
    v[b % DIMS] = (1.0 - weight * weight).sqrt();
    v
}

/// Embedding provider for tests: each known text maps to a fixed vector,
/// unknown texts map to the zero vector. Deterministic and order-preserving
/// by construction.
pub struct StubProvider {
    vectors: HashMap<String, Vec<f32>>,
}

impl StubProvider {
    pub fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        let vectors = entries
            .iter()
            .map(|(text, v)| (text.to_string(), v.clone()))
            .collect();
        Self { vectors }
    }
}

impl EmbeddingProvider for StubProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; DIMS]))
    }

    fn dimensions(&self) -> usize {
        DIMS
    }
}

pub fn source_field(table: &str, field: &str, description: &str) -> SourceField {
    SourceField {
        table: table.into(),
        source_system: "legacy".into(),
        field_name: field.into(),
        description: description.into(),
    }
}

pub fn target_field(table: &str, field: &str, description: &str) -> TargetField {
    TargetField {
        table: table.into(),
        field_name: field.into(),
        description: description.into(),
    }
}
