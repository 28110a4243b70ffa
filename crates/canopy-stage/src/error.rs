//! Error types for the stage crate.

/// Errors that can occur during staging or tree projection.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StageError {
    /// The specified path was not found in the store.
    #[error("path not found in store: {0}")]
    PathNotFound(String),

    /// An entry's parent path does not resolve to any node in the store.
    ///
    /// This is a data-integrity defect introduced by a malformed listing or
    /// a buggy staging operation, never a user-recoverable condition.
    #[error("entry {path} references missing parent {parent}")]
    OrphanedEntry { path: String, parent: String },

    /// An entry name was empty or contained a path separator.
    #[error("invalid entry name: {0:?}")]
    InvalidName(String),
}

/// Convenience alias for stage results.
pub type StageResult<T> = Result<T, StageError>;
