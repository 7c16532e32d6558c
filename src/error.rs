use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pipeline and search operations.
#[derive(Error, Debug)]
pub enum GutensearchError {
    /// A single document is missing from the source. Batch operations skip
    /// the document and keep going; callers that asked for exactly this
    /// document surface the error.
    #[error("document {0} not found in source")]
    DocumentNotFound(String),

    /// The document source itself cannot be reached. Aborts the current
    /// fetch or build step; retryable.
    #[error("document source unavailable: {0}")]
    SourceUnavailable(String),

    /// No index has ever been persisted at this location.
    #[error("no persisted index at {}", .0.display())]
    IndexNotFound(PathBuf),

    /// A persisted index exists but failed to parse. Never treated as an
    /// empty index.
    #[error("persisted index at {} is corrupt: {reason}", .path.display())]
    IndexCorrupt { path: PathBuf, reason: String },

    /// Persisted pipeline state lists documents as indexed that were never
    /// fetched. Requires operator intervention.
    #[error("pipeline state invariant violated: indexed but never fetched: {0:?}")]
    InvariantViolation(Vec<String>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for gutensearch operations.
pub type Result<T> = std::result::Result<T, GutensearchError>;

impl GutensearchError {
    /// Check if this error indicates a transient failure that could be retried.
    pub fn is_retriable(&self) -> bool {
        matches!(self, GutensearchError::SourceUnavailable(_))
    }
}
