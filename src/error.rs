//! Error types for survey-signals

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading study files or writing summaries
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Cannot read {}: {reason}", path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("Failed to write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },
}
