//! Error types for Workout Flux

use thiserror::Error;

/// Errors that can occur while reading packages or computing metrics
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("Unknown workout type: {0}")]
    UnknownKind(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
