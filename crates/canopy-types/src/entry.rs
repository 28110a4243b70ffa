//! Repository entry types as seen in a flat listing.

use serde::{Deserialize, Serialize};

/// Whether an entry is a file or a folder.
///
/// The GitLab wire format calls these `blob` and `tree`; that mapping lives
/// in `canopy-remote` so the engine stays wire-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Returns `true` for folder entries.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }
}

/// One entry of a flat repository listing, as returned by the remote.
///
/// Paths are full paths relative to the repository root, not yet re-keyed
/// against the explorer's configured subtree root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Remote-issued identifier (a blob or tree SHA for GitLab).
    pub id: String,
    /// File mode bits as reported by the remote, e.g. `100644`.
    pub mode: String,
    /// Leaf name, no path segments.
    pub name: String,
    /// Full path within the repository.
    pub path: String,
    /// File or folder.
    pub kind: EntryKind,
}

impl RemoteEntry {
    /// Convenience constructor used throughout the test suites.
    pub fn new(id: impl Into<String>, path: impl Into<String>, kind: EntryKind) -> Self {
        let path = path.into();
        let name = crate::path::leaf_name(&path).to_string();
        Self {
            id: id.into(),
            mode: String::new(),
            name,
            path,
            kind,
        }
    }
}
