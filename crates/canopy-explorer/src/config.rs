//! Explorer configuration: the four host parameters plus the target branch.

use serde::{Deserialize, Serialize};

/// The branch commits are submitted to unless the host overrides it.
pub const DEFAULT_BRANCH: &str = "master";

/// Host-supplied configuration.
///
/// Given all four host values the explorer completes one full ingest cycle
/// on the first refresh. Without a repository path, refresh is a no-op
/// yielding an empty tree rather than an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// OAuth application identifier.
    pub app_id: String,
    /// OAuth redirect target.
    pub redirect_url: String,
    /// Remote project identifier: a numeric id or a namespaced path.
    pub repository_path: String,
    /// Root of the browsed subtree; empty browses the repository root.
    pub root_path: String,
    /// Branch commits are submitted to.
    pub branch: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            redirect_url: String::new(),
            repository_path: String::new(),
            root_path: String::new(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl ExplorerConfig {
    pub fn new(
        app_id: impl Into<String>,
        redirect_url: impl Into<String>,
        repository_path: impl Into<String>,
        root_path: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            redirect_url: redirect_url.into(),
            repository_path: repository_path.into(),
            root_path: root_path.into(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Returns `true` once a repository path is configured.
    pub fn is_ready(&self) -> bool {
        !self.repository_path.is_empty()
    }

    /// The OAuth implicit-flow authorization URL for this application.
    ///
    /// Token acquisition itself is outside the engine; the host sends the
    /// user here and hands the resulting bearer token to the transport.
    pub fn authorize_url(&self) -> String {
        format!(
            "https://gitlab.com/oauth/authorize?client_id={}&redirect_uri={}&scope=api&response_type=token",
            self.app_id, self.redirect_url
        )
    }
}
