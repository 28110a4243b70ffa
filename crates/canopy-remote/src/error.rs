//! Error types for the remote boundary.

/// Errors that can occur talking to a remote repository.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("remote api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The bearer token is missing, invalid, or expired.
    #[error("unauthorized by remote repository")]
    Unauthorized,

    /// The remote answered something we could not interpret.
    #[error("invalid response from remote: {0}")]
    InvalidResponse(String),
}

/// Convenience alias for remote results.
pub type RemoteResult<T> = Result<T, RemoteError>;
