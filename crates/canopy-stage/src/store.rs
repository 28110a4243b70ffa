//! The flat-map store: the authoritative structure behind the staged tree.
//!
//! The [`StageStore`] manages a `BTreeMap<String, Node>` keyed by
//! root-relative path. All staging operations mutate this map; the
//! hierarchical tree is a projection rebuilt from it by [`crate::tree`].
//! A deep copy of the post-ingest map is retained as the baseline and is
//! consumed only by [`StageStore::reset`].

use std::collections::BTreeMap;

use canopy_types::RemoteEntry;
use tracing::debug;

use crate::error::{StageError, StageResult};
use crate::node::{FileUpload, Node};

/// The staged-tree store: live entries, retained baseline, and the
/// transient drag-hover target.
///
/// The hover target is an explicit optional field rather than a reserved
/// sentinel key, so it can never collide with a real path, never reaches a
/// commit plan, and is excluded from change detection by construction.
#[derive(Clone, Debug, Default)]
pub struct StageStore {
    entries: BTreeMap<String, Node>,
    baseline: BTreeMap<String, Node>,
    hover: Option<String>,
}

impl StageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the live map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the live map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by root-relative path.
    pub fn get(&self, path: &str) -> Option<&Node> {
        self.entries.get(path)
    }

    /// Returns `true` if `path` exists in the live map.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Iterate the live entries in path order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.entries.values()
    }

    /// The current hover target, if a drag is in progress.
    pub fn hover(&self) -> Option<&str> {
        self.hover.as_deref()
    }

    // ---------------------------------------------------------------
    // Ingestion and reset
    // ---------------------------------------------------------------

    /// Replace the store with a fresh remote listing.
    ///
    /// Every entry is re-keyed by its path with the `<root>/` prefix
    /// stripped, both staged flags cleared. The resulting map is retained
    /// as the baseline for [`StageStore::reset`]. Any in-progress hover
    /// target is discarded.
    pub fn ingest(&mut self, listing: &[RemoteEntry], root: &str) {
        self.entries.clear();
        for entry in listing {
            let node = Node::from_remote(entry, root);
            self.entries.insert(node.path.clone(), node);
        }
        self.baseline = self.entries.clone();
        self.hover = None;
        debug!(entries = self.entries.len(), root, "ingested remote listing");
    }

    /// Replace the live map with a fresh copy of the retained baseline,
    /// discarding every staged edit and any hover target.
    pub fn reset(&mut self) {
        self.entries = self.baseline.clone();
        self.hover = None;
    }

    // ---------------------------------------------------------------
    // Staging operations
    // ---------------------------------------------------------------

    /// Stage a new folder at `parent/name`. A duplicate path silently
    /// overwrites the existing entry.
    pub fn create_folder(&mut self, parent: &str, name: &str) -> StageResult<()> {
        validate_name(name)?;
        let node = Node::new_folder(parent, name);
        self.entries.insert(node.path.clone(), node);
        Ok(())
    }

    /// Stage one new file node per upload, each at `parent/<name>` with its
    /// raw contents attached.
    pub fn create_files(&mut self, parent: &str, uploads: Vec<FileUpload>) -> StageResult<()> {
        for upload in &uploads {
            validate_name(&upload.name)?;
        }
        for upload in uploads {
            let node = Node::new_file(parent, &upload.name, upload.content);
            self.entries.insert(node.path.clone(), node);
        }
        Ok(())
    }

    /// Stage a deletion. A node that only exists locally is removed
    /// outright (there is nothing to delete remotely); a remote node is
    /// flagged. Repeating the call on a flagged node is a no-op.
    pub fn delete(&mut self, path: &str) -> StageResult<()> {
        let node = self
            .entries
            .get_mut(path)
            .ok_or_else(|| StageError::PathNotFound(path.to_string()))?;

        if node.flags.new {
            self.entries.remove(path);
        } else {
            node.flags.deleted = true;
        }
        Ok(())
    }

    /// Clear a staged deletion.
    pub fn undelete(&mut self, path: &str) -> StageResult<()> {
        let node = self
            .entries
            .get_mut(path)
            .ok_or_else(|| StageError::PathNotFound(path.to_string()))?;

        node.flags.deleted = false;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Hover target
    // ---------------------------------------------------------------

    /// Point the hover placeholder at `parent`. Returns `true` if the
    /// target changed; repeated calls with the same target are cheap
    /// no-ops so high-frequency hover events cannot thrash the tree.
    pub fn set_hover(&mut self, parent: &str) -> bool {
        if self.hover.as_deref() == Some(parent) {
            return false;
        }
        self.hover = Some(parent.to_string());
        true
    }

    /// Remove the hover target. Returns `true` if one was present.
    pub fn clear_hover(&mut self) -> bool {
        self.hover.take().is_some()
    }
}

fn validate_name(name: &str) -> StageResult<()> {
    if name.is_empty() || name.contains('/') {
        return Err(StageError::InvalidName(name.to_string()));
    }
    Ok(())
}
