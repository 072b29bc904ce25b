//! Error types for strew-save operations.

use thiserror::Error;

/// Errors that can occur while reading, writing, or extending an entity
/// collection document.
#[derive(Debug, Error)]
pub enum SaveError {
    /// An actor of the scanned class has a path name whose trailing segment
    /// is not a decimal id.
    #[error("actor path name has no numeric id suffix: {path_name}")]
    BadPathSuffix {
        /// The offending actor path name.
        path_name: String,
    },

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or does not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;
