//! Structured error types for the evaluator.
//!
//! Responder misbehaviour is never an error here: an empty or useless
//! response simply scores low and flows through the error-rate accounting.

use std::path::PathBuf;

/// Errors surfaced by the evaluator and its session export.
#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    /// Statistics were requested before any trial ran.
    #[error("No trials have been recorded yet")]
    EmptyHistory,

    /// The challenge source produced a malformed challenge.
    #[error("Invalid challenge '{challenge_id}': {reason}")]
    InvalidChallenge { challenge_id: String, reason: String },

    /// The complexity level drifted out of the finite positive range.
    #[error("Complexity level must be finite and positive, got {value}")]
    InvalidComplexity { value: f64 },

    /// A configuration value is outside its accepted range.
    #[error("Invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Failed to write a session export to disk.
    #[error("Failed to write {}: {source}", .path.display())]
    ExportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a session export from disk.
    #[error("Failed to read {}: {source}", .path.display())]
    ExportRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to encode or decode session JSON.
    #[error("Failed to process session JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl EvaluatorError {
    /// Whether the evaluator state is guaranteed untouched after this error.
    pub fn leaves_state_unchanged(&self) -> bool {
        matches!(
            self,
            Self::EmptyHistory | Self::InvalidChallenge { .. } | Self::InvalidComplexity { .. }
        )
    }
}

/// Result type alias for evaluator operations.
pub type EvaluatorResult<T> = Result<T, EvaluatorError>;
