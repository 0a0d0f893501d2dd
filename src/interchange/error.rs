//! Error types for interchange operations.

use thiserror::Error;

/// Errors that can occur while writing a symbol table.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl InterchangeError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }
}
