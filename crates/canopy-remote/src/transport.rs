//! The transport interface the engine consumes.

use async_trait::async_trait;
use canopy_types::{CommitAction, RemoteEntry};

use crate::api::CommitInfo;
use crate::error::RemoteResult;

/// Options for a subtree listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListTreeOptions {
    /// Subtree to list, relative to the repository root; empty lists the
    /// whole repository.
    pub path: String,
    /// Descend into subfolders.
    pub recursive: bool,
    /// Page size for paginated transports.
    pub per_page: u32,
}

impl Default for ListTreeOptions {
    fn default() -> Self {
        Self {
            path: String::new(),
            recursive: true,
            per_page: 100,
        }
    }
}

impl ListTreeOptions {
    /// Recursive listing of the given subtree.
    pub fn subtree(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Interface to a remote repository.
///
/// `repository` is the remote's project identifier (a numeric id or a
/// namespaced path such as `group/project` for GitLab).
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// Flat listing of a subtree.
    async fn list_tree(
        &self,
        repository: &str,
        options: &ListTreeOptions,
    ) -> RemoteResult<Vec<RemoteEntry>>;

    /// Submit one atomic multi-action commit to `branch`.
    async fn create_commit(
        &self,
        repository: &str,
        branch: &str,
        message: &str,
        actions: &[CommitAction],
    ) -> RemoteResult<CommitInfo>;
}
