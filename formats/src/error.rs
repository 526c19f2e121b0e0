//! Error types for the decoders.
//!

use thiserror::Error;

/// Structural or type mismatch found while decoding a state vector payload.
///
/// Any of these aborts the whole decode, we never return a partial `StateList`.
///
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("wrong record length for state #{index}: expected {expected}, got {got}")]
    WrongLength {
        index: usize,
        expected: usize,
        got: usize,
    },
    #[error("missing/invalid field {field}{}: expected {expected}", fmt_index(.index))]
    InvalidField {
        /// Position of the record inside `states`, `None` for top-level fields
        index: Option<usize>,
        field: &'static str,
        expected: &'static str,
    },
    #[error("malformed top-level document: {0}")]
    MalformedDocument(String),
}

fn fmt_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" in state #{i}"),
        None => String::new(),
    }
}

/// Everything that can go wrong between raw bytes and a `StateList`.
///
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
