//! Semantic schema reconciliation for tabular data dictionaries.
//!
//! `fieldmap` maps the fields of one schema (the *source*) onto the
//! semantically closest fields of another schema (the *target*). Field names
//! rarely line up syntactically across systems — `cust_id` vs `customer_id`
//! — so matching runs on sentence embeddings of two signals per field:
//!
//! | Signal | Suggested weight |
//! |--------|------------------|
//! | Description text | 0.7 |
//! | Field name | 0.3 |
//!
//! The two cosine-similarity signals are blended into one combined score per
//! source/target pair, candidates are ranked best-first per source field, and
//! every candidate at or above a configurable threshold is reported. The
//! mapping is deliberately one-to-many: a source field may match zero, one,
//! or several target fields.
//!
//! # Architecture
//!
//! - **Embeddings**: Local ONNX Runtime with all-MiniLM-L6-v2 (384 dimensions)
//! - **Matching**: dense pairwise cosine matrices over descriptions and field
//!   names, weighted blend, per-row descending scan with threshold cutoff
//! - **I/O**: CSV schema listings in, CSV match report out
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`embedding`] — Text-to-vector embedding pipeline via ONNX Runtime
//! - [`matching`] — Core matching engine: similarity matrices, ranking, assembly
//! - [`tabular`] — CSV reading of schema listings and writing of match reports
//! - [`flatten`] — YAML schema definitions flattened to one row per field

pub mod config;
pub mod embedding;
pub mod flatten;
pub mod matching;
pub mod tabular;
