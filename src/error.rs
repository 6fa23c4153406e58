//! Error types.

use thiserror::Error;

/// Failures surfaced by the smoothing entry points.
///
/// Short inputs and degenerate segments are not errors; they pass through
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SmoothError {
    #[error("{field} = {value} is out of range (expected {expected})")]
    ConfigOutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("no centroid known for cell {0}")]
    UnknownCell(String),
}

/// Failures talking to the graph database.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("graph query error {code}: {message}")]
    Query { code: String, message: String },

    #[error("no path between {from} and {to}")]
    NoPath { from: String, to: String },
}
