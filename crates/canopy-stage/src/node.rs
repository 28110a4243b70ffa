//! Node types for the staged tree.

use canopy_types::{path, EntryKind, RemoteEntry};
use serde::{Deserialize, Serialize};

/// Staged-status flags for a node.
///
/// `new` and `deleted` are mutually exclusive in steady state: deleting a
/// node that only exists locally removes it from the store outright, so a
/// node never carries both flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    /// Created locally since the last successful fetch or commit.
    pub new: bool,
    /// Marked for deletion; only meaningful for entries that exist remotely.
    pub deleted: bool,
}

/// One file or folder entry of the flat store.
///
/// `Node` carries no child list. The hierarchy is a derived projection
/// rebuilt by [`crate::tree::build`] on every pass; the flat map stays the
/// single authoritative structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Remote-issued identifier, or a synthetic `upload-…` id for entries
    /// staged locally.
    pub id: String,
    pub kind: EntryKind,
    /// Leaf display name, no path segments.
    pub name: String,
    /// Full path relative to the explorer's configured root.
    pub path: String,
    /// Path of the containing folder; empty for root-level entries.
    pub parent_path: String,
    pub flags: NodeFlags,
    /// Raw file contents, present only on locally created file nodes.
    pub payload: Option<Vec<u8>>,
}

impl Node {
    /// Build a node from a remote listing entry, re-keyed against `root`.
    pub fn from_remote(entry: &RemoteEntry, root: &str) -> Self {
        let rel = path::strip_root(&entry.path, root).to_string();
        let parent_path = path::parent_of(&rel).to_string();
        Self {
            id: entry.id.clone(),
            kind: entry.kind,
            name: entry.name.clone(),
            path: rel,
            parent_path,
            flags: NodeFlags::default(),
            payload: None,
        }
    }

    /// A locally created folder at `parent/name`.
    pub fn new_folder(parent: &str, name: &str) -> Self {
        Self {
            id: format!("upload-folder-{name}"),
            kind: EntryKind::Folder,
            name: name.to_string(),
            path: path::join(parent, name),
            parent_path: parent.to_string(),
            flags: NodeFlags {
                new: true,
                deleted: false,
            },
            payload: None,
        }
    }

    /// A locally created file at `parent/name` carrying its raw contents.
    pub fn new_file(parent: &str, name: &str, content: Vec<u8>) -> Self {
        Self {
            id: format!("upload-{name}"),
            kind: EntryKind::File,
            name: name.to_string(),
            path: path::join(parent, name),
            parent_path: parent.to_string(),
            flags: NodeFlags {
                new: true,
                deleted: false,
            },
            payload: Some(content),
        }
    }

    /// Returns `true` if this node counts toward pending changes.
    pub fn is_pending(&self) -> bool {
        self.flags.new || self.flags.deleted
    }
}

/// A file being staged for upload: leaf name plus raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub content: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_remote_strips_root_and_derives_parent() {
        let entry = RemoteEntry::new("sha1", "root/docs/intro.md", EntryKind::File);
        let node = Node::from_remote(&entry, "root");
        assert_eq!(node.path, "docs/intro.md");
        assert_eq!(node.parent_path, "docs");
        assert!(!node.is_pending());
    }

    #[test]
    fn from_remote_root_level_entry_has_empty_parent() {
        let entry = RemoteEntry::new("sha2", "root/README.md", EntryKind::File);
        let node = Node::from_remote(&entry, "root");
        assert_eq!(node.path, "README.md");
        assert_eq!(node.parent_path, "");
    }

    #[test]
    fn new_folder_is_pending_with_synthetic_id() {
        let node = Node::new_folder("docs", "images");
        assert_eq!(node.id, "upload-folder-images");
        assert_eq!(node.path, "docs/images");
        assert!(node.flags.new);
        assert!(node.is_pending());
        assert!(node.payload.is_none());
    }

    #[test]
    fn new_file_keeps_payload() {
        let node = Node::new_file("", "notes.txt", b"hello".to_vec());
        assert_eq!(node.id, "upload-notes.txt");
        assert_eq!(node.path, "notes.txt");
        assert_eq!(node.payload.as_deref(), Some(b"hello".as_slice()));
    }
}
