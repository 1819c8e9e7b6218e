//! Typed error values for the scoring pipeline.
//!
//! Defined here so loaders and the CLI can distinguish structural input
//! errors from lookup misses without string matching.

use thiserror::Error;

/// Errors raised by benchmark construction, prediction-shape checks,
/// and question lookup.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Malformed input shape at a boundary (unrecognized prediction
    /// container, missing required column, empty expected answer).
    /// Aborts the operation that detected it.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Lookup of a nonexistent question id.
    #[error("question not found: {0}")]
    NotFound(String),
}

impl EvalError {
    pub fn validation(message: impl Into<String>) -> Self {
        EvalError::Validation(message.into())
    }
}
