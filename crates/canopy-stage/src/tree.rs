//! Tree projection: flat map in, hierarchical tree out.
//!
//! [`build`] is a pure function of the store's current contents. It never
//! mutates the store; child lists exist only on the returned [`TreeNode`]s,
//! so deleted entries can never leave dangling child references behind.

use std::collections::BTreeMap;

use canopy_types::{path, EntryKind};

use crate::error::{StageError, StageResult};
use crate::node::{Node, NodeFlags};
use crate::store::StageStore;

/// Leaf path segment of the synthesized drag-hover placeholder.
pub const PLACEHOLDER_SEGMENT: &str = "temporary-placeholder";

/// One node of the projected tree, with its children in store path order.
///
/// Display ordering (folders before files) is a rendering concern layered
/// on top by callers; the builder makes no ordering promise beyond
/// determinism.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub node: Node,
    pub children: Vec<TreeNode>,
}

/// The result of a tree build: root-level nodes plus the pending flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub roots: Vec<TreeNode>,
    /// `true` iff at least one real node is staged as new or deleted. The
    /// hover placeholder never contributes; it is not part of the map.
    pub has_pending_changes: bool,
}

/// Project the store into a hierarchical tree.
///
/// Errors with [`StageError::OrphanedEntry`] when an entry (or the hover
/// target) references a parent path absent from the store; that indicates
/// malformed ingestion or a buggy staging operation and must not be
/// silently dropped.
pub fn build(store: &StageStore) -> StageResult<TreeSnapshot> {
    let mut children_of: BTreeMap<&str, Vec<&Node>> = BTreeMap::new();
    let mut top: Vec<&Node> = Vec::new();

    for node in store.nodes() {
        if node.parent_path.is_empty() {
            top.push(node);
        } else if store.contains(&node.parent_path) {
            children_of.entry(node.parent_path.as_str()).or_default().push(node);
        } else {
            return Err(StageError::OrphanedEntry {
                path: node.path.clone(),
                parent: node.parent_path.clone(),
            });
        }
    }

    let placeholder = match store.hover() {
        Some(parent) => {
            if !parent.is_empty() && !store.contains(parent) {
                return Err(StageError::OrphanedEntry {
                    path: path::join(parent, PLACEHOLDER_SEGMENT),
                    parent: parent.to_string(),
                });
            }
            Some(placeholder_node(parent))
        }
        None => None,
    };

    let mut roots: Vec<TreeNode> = top
        .into_iter()
        .map(|node| assemble(node, &children_of, placeholder.as_ref()))
        .collect();
    if let Some(ph) = &placeholder {
        if ph.parent_path.is_empty() {
            roots.push(TreeNode {
                node: ph.clone(),
                children: Vec::new(),
            });
        }
    }

    let has_pending_changes = store.nodes().any(Node::is_pending);

    Ok(TreeSnapshot {
        roots,
        has_pending_changes,
    })
}

fn assemble(
    node: &Node,
    children_of: &BTreeMap<&str, Vec<&Node>>,
    placeholder: Option<&Node>,
) -> TreeNode {
    let mut children: Vec<TreeNode> = children_of
        .get(node.path.as_str())
        .into_iter()
        .flatten()
        .copied()
        .map(|child| assemble(child, children_of, placeholder))
        .collect();

    if let Some(ph) = placeholder {
        if ph.parent_path == node.path {
            children.push(TreeNode {
                node: ph.clone(),
                children: Vec::new(),
            });
        }
    }

    TreeNode { node: node.clone(), children }
}

/// The display-only placeholder shown while files are dragged over a
/// folder. It exists only in the projection, never in the flat map.
fn placeholder_node(parent: &str) -> Node {
    let name = if parent.is_empty() {
        "Upload file(s) to root".to_string()
    } else {
        format!("Upload file(s) to '/{parent}'")
    };
    Node {
        id: PLACEHOLDER_SEGMENT.to_string(),
        kind: EntryKind::File,
        name,
        path: path::join(parent, PLACEHOLDER_SEGMENT),
        parent_path: parent.to_string(),
        flags: NodeFlags {
            new: true,
            deleted: false,
        },
        payload: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::FileUpload;
    use canopy_types::RemoteEntry;

    fn ingested() -> StageStore {
        let mut store = StageStore::new();
        store.ingest(
            &[
                RemoteEntry::new("t1", "root/a", EntryKind::Folder),
                RemoteEntry::new("b1", "root/a/b.txt", EntryKind::File),
            ],
            "root",
        );
        store
    }

    #[test]
    fn nests_children_under_parents() {
        let snapshot = build(&ingested()).unwrap();
        assert_eq!(snapshot.roots.len(), 1);
        let a = &snapshot.roots[0];
        assert_eq!(a.node.path, "a");
        assert!(a.node.kind.is_folder());
        assert_eq!(a.children.len(), 1);
        assert_eq!(a.children[0].node.path, "a/b.txt");
        assert!(!snapshot.has_pending_changes);
    }

    #[test]
    fn rebuild_reflects_staged_edits() {
        let mut store = ingested();
        store.delete("a/b.txt").unwrap();
        let snapshot = build(&store).unwrap();
        assert!(snapshot.has_pending_changes);
        assert!(snapshot.roots[0].children[0].node.flags.deleted);
    }

    #[test]
    fn deleted_folder_keeps_children_visible() {
        let mut store = ingested();
        store.delete("a").unwrap();
        let snapshot = build(&store).unwrap();
        assert!(snapshot.roots[0].node.flags.deleted);
        assert_eq!(snapshot.roots[0].children.len(), 1);
    }

    #[test]
    fn new_nodes_mark_pending() {
        let mut store = ingested();
        store
            .create_files("a", vec![FileUpload::new("c.txt", b"c".to_vec())])
            .unwrap();
        let snapshot = build(&store).unwrap();
        assert!(snapshot.has_pending_changes);
    }

    #[test]
    fn orphaned_parent_is_a_defect() {
        let mut store = ingested();
        store
            .create_files("ghost", vec![FileUpload::new("x.txt", b"x".to_vec())])
            .unwrap();
        let err = build(&store).unwrap_err();
        assert_eq!(
            err,
            StageError::OrphanedEntry {
                path: "ghost/x.txt".to_string(),
                parent: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn hover_placeholder_appears_under_target() {
        let mut store = ingested();
        store.set_hover("a");
        let snapshot = build(&store).unwrap();
        let a = &snapshot.roots[0];
        assert_eq!(a.children.len(), 2);
        let ph = &a.children[1].node;
        assert_eq!(ph.path, "a/temporary-placeholder");
        assert_eq!(ph.name, "Upload file(s) to '/a'");
    }

    #[test]
    fn hover_placeholder_at_root() {
        let mut store = ingested();
        store.set_hover("");
        let snapshot = build(&store).unwrap();
        let ph = &snapshot.roots.last().unwrap().node;
        assert_eq!(ph.path, "temporary-placeholder");
        assert_eq!(ph.name, "Upload file(s) to root");
    }

    #[test]
    fn hover_placeholder_never_counts_as_pending() {
        let mut store = StageStore::new();
        store.ingest(&[], "root");
        store.set_hover("");
        let snapshot = build(&store).unwrap();
        assert_eq!(snapshot.roots.len(), 1);
        assert!(!snapshot.has_pending_changes);
    }

    #[test]
    fn hover_over_missing_folder_is_a_defect() {
        let mut store = ingested();
        store.set_hover("ghost");
        assert!(matches!(
            build(&store),
            Err(StageError::OrphanedEntry { .. })
        ));
    }

    #[test]
    fn reset_round_trips_to_the_post_ingest_tree() {
        let mut store = ingested();
        let before = build(&store).unwrap();

        store.delete("a/b.txt").unwrap();
        store.create_folder("a", "sub").unwrap();
        store
            .create_files("", vec![FileUpload::new("new.txt", b"n".to_vec())])
            .unwrap();
        store.reset();

        let after = build(&store).unwrap();
        assert_eq!(before, after);
    }
}
