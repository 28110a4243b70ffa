//! In-memory remote repository for testing and offline use.
//!
//! [`InMemoryRemote`] holds a flat listing in a `BTreeMap` behind a
//! `RwLock` and applies submitted commit actions to it, so an ingest
//! after a successful commit observes the updated listing exactly like it
//! would against a real remote.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use canopy_types::{path, ActionKind, CommitAction, EntryKind, RemoteEntry};

use crate::api::CommitInfo;
use crate::error::{RemoteError, RemoteResult};
use crate::transport::{ListTreeOptions, RemoteRepository};

/// A commit accepted by the in-memory remote, kept for inspection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitRecord {
    pub branch: String,
    pub message: String,
    pub actions: Vec<CommitAction>,
}

/// An in-memory implementation of [`RemoteRepository`].
///
/// All data lives behind `RwLock`s and is lost when the remote is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    entries: RwLock<BTreeMap<String, RemoteEntry>>,
    commits: RwLock<Vec<CommitRecord>>,
}

impl InMemoryRemote {
    /// Create an empty remote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a remote pre-seeded with listing entries.
    pub fn with_entries(entries: impl IntoIterator<Item = RemoteEntry>) -> Self {
        let map: BTreeMap<String, RemoteEntry> = entries
            .into_iter()
            .map(|entry| (entry.path.clone(), entry))
            .collect();
        Self {
            entries: RwLock::new(map),
            commits: RwLock::new(Vec::new()),
        }
    }

    /// The commits accepted so far, oldest first.
    pub fn commits(&self) -> Vec<CommitRecord> {
        self.commits
            .read()
            .map(|commits| commits.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if the listing contains `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(path))
            .unwrap_or(false)
    }

    fn apply(&self, actions: &[CommitAction]) -> RemoteResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| RemoteError::InvalidResponse(format!("lock poisoned: {e}")))?;

        // Validate before mutating: the remote commit is atomic.
        for action in actions {
            match action.action {
                ActionKind::Create => {
                    if entries.contains_key(&action.file_path) {
                        return Err(RemoteError::Api {
                            status: 400,
                            message: format!("file already exists: {}", action.file_path),
                        });
                    }
                }
                ActionKind::Delete => {
                    if !entries.contains_key(&action.file_path) {
                        return Err(RemoteError::Api {
                            status: 400,
                            message: format!("file does not exist: {}", action.file_path),
                        });
                    }
                }
            }
        }

        for action in actions {
            match action.action {
                ActionKind::Create => {
                    // Folders are implicit in file paths; materialize the
                    // ancestors so recursive listings stay well-formed.
                    let mut ancestor = path::parent_of(&action.file_path);
                    while !ancestor.is_empty() {
                        entries
                            .entry(ancestor.to_string())
                            .or_insert_with(|| folder_entry(ancestor));
                        ancestor = path::parent_of(ancestor);
                    }
                    entries.insert(
                        action.file_path.clone(),
                        file_entry(&action.file_path),
                    );
                }
                ActionKind::Delete => {
                    entries.remove(&action.file_path);
                }
            }
        }
        Ok(())
    }
}

fn folder_entry(folder_path: &str) -> RemoteEntry {
    RemoteEntry {
        id: format!("tree-{folder_path}"),
        mode: "040000".to_string(),
        name: path::leaf_name(folder_path).to_string(),
        path: folder_path.to_string(),
        kind: EntryKind::Folder,
    }
}

fn file_entry(file_path: &str) -> RemoteEntry {
    RemoteEntry {
        id: format!("blob-{file_path}"),
        mode: "100644".to_string(),
        name: path::leaf_name(file_path).to_string(),
        path: file_path.to_string(),
        kind: EntryKind::File,
    }
}

#[async_trait]
impl RemoteRepository for InMemoryRemote {
    async fn list_tree(
        &self,
        _repository: &str,
        options: &ListTreeOptions,
    ) -> RemoteResult<Vec<RemoteEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| RemoteError::InvalidResponse(format!("lock poisoned: {e}")))?;

        let listing = entries
            .values()
            .filter(|entry| {
                if options.path.is_empty() {
                    options.recursive || !entry.path.contains('/')
                } else if options.recursive {
                    entry.path.starts_with(&format!("{}/", options.path))
                } else {
                    path::parent_of(&entry.path) == options.path
                }
            })
            .cloned()
            .collect();
        Ok(listing)
    }

    async fn create_commit(
        &self,
        _repository: &str,
        branch: &str,
        message: &str,
        actions: &[CommitAction],
    ) -> RemoteResult<CommitInfo> {
        self.apply(actions)?;

        let mut commits = self
            .commits
            .write()
            .map_err(|e| RemoteError::InvalidResponse(format!("lock poisoned: {e}")))?;
        commits.push(CommitRecord {
            branch: branch.to_string(),
            message: message.to_string(),
            actions: actions.to_vec(),
        });

        let id = format!("mem{:07}", commits.len());
        Ok(CommitInfo {
            short_id: id[..7.min(id.len())].to_string(),
            title: message.lines().next().unwrap_or_default().to_string(),
            message: message.to_string(),
            created_at: None,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryRemote {
        InMemoryRemote::with_entries([
            RemoteEntry::new("t1", "root", EntryKind::Folder),
            RemoteEntry::new("t2", "root/a", EntryKind::Folder),
            RemoteEntry::new("b1", "root/a/b.txt", EntryKind::File),
            RemoteEntry::new("b2", "other/c.txt", EntryKind::File),
        ])
    }

    #[tokio::test]
    async fn lists_subtree_recursively() {
        let remote = seeded();
        let listing = remote
            .list_tree("proj", &ListTreeOptions::subtree("root"))
            .await
            .unwrap();
        let paths: Vec<&str> = listing.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["root/a", "root/a/b.txt"]);
    }

    #[tokio::test]
    async fn non_recursive_lists_direct_children_only() {
        let remote = seeded();
        let options = ListTreeOptions {
            recursive: false,
            ..ListTreeOptions::subtree("root")
        };
        let listing = remote.list_tree("proj", &options).await.unwrap();
        let paths: Vec<&str> = listing.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["root/a"]);
    }

    #[tokio::test]
    async fn create_commit_applies_actions_to_listing() {
        let remote = seeded();
        let actions = vec![
            CommitAction::delete("root/a/b.txt"),
            CommitAction::create("root/new/d.txt", "ZA=="),
        ];
        remote
            .create_commit("proj", "master", "two changes", &actions)
            .await
            .unwrap();

        assert!(!remote.contains("root/a/b.txt"));
        assert!(remote.contains("root/new/d.txt"));
        // Ancestor folder materialized for later recursive listings.
        assert!(remote.contains("root/new"));
        assert_eq!(remote.commits().len(), 1);
        assert_eq!(remote.commits()[0].branch, "master");
    }

    #[tokio::test]
    async fn delete_of_missing_path_is_rejected_atomically() {
        let remote = seeded();
        let actions = vec![
            CommitAction::create("root/x.txt", "eA=="),
            CommitAction::delete("root/missing.txt"),
        ];
        let err = remote
            .create_commit("proj", "master", "bad", &actions)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Api { status: 400, .. }));
        // Nothing was applied.
        assert!(!remote.contains("root/x.txt"));
        assert!(remote.commits().is_empty());
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let remote = seeded();
        let actions = vec![CommitAction::create("root/a/b.txt", "eA==")];
        let err = remote
            .create_commit("proj", "master", "dup", &actions)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Api { status: 400, .. }));
    }
}
