//! Delimited-file boundary of the system.
//!
//! Schema listings come in as CSV, the match report goes out as CSV. This is
//! a thin adapter: the only logic is dropping rows whose mandatory text
//! fields are missing before they reach the matching engine.

pub mod reader;
pub mod writer;
