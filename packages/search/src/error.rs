//! Error types for the query layer.

use thiserror::Error;

/// Errors from the query front-end.
///
/// The matcher itself is infallible over a well-formed tree; errors
/// only arise resolving paths and writing result files.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A subtree path resolved to no node.
    #[error("subtree path '{path}' did not match any node")]
    SubtreeNotFound { path: String },

    /// Writing a result file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON export failed to serialize.
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
