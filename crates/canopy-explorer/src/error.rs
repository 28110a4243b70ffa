//! Error types for the explorer facade.

use canopy_remote::RemoteError;
use canopy_stage::StageError;

/// Errors surfaced by the explorer lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// Staging or tree projection failed.
    #[error("stage error: {0}")]
    Stage(#[from] StageError),

    /// The remote repository call failed.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Commit requested while no staged changes exist.
    #[error("nothing to commit: no staged changes")]
    NothingToCommit,

    /// Submission requested while no plan is pending confirmation.
    #[error("no commit plan pending confirmation")]
    NoPendingPlan,
}

/// Convenience alias for explorer results.
pub type ExplorerResult<T> = Result<T, ExplorerError>;
