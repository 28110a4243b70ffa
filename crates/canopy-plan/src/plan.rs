//! Staged store to commit plan conversion.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use canopy_stage::StageStore;
use canopy_types::{path, CommitAction};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An ordered action list plus its summary message, pending confirmation.
///
/// The plan is a pure value derived from the store; holding or discarding
/// it never mutates staged state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPlan {
    pub actions: Vec<CommitAction>,
    pub message: String,
}

impl CommitPlan {
    /// Returns `true` if the plan contains no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of actions in the plan.
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/// Scan the store and derive the commit plan.
///
/// - A node staged for deletion yields a `delete` action for its full path
///   (the `<root>/` prefix re-attached) and a `Delete: <path>` line.
/// - A locally created file yields a `create` action with base64-encoded
///   content and a `Create: <path>` line.
/// - Locally created folders yield nothing; folders are implicit in the
///   file paths the target store accepts.
///
/// Message lines are sorted lexicographically before joining so the
/// human-reviewed summary is deterministic regardless of staging order.
/// The hover target is a store field rather than a map entry, so it can
/// never contribute an action.
pub fn build_plan(store: &StageStore, root: &str) -> CommitPlan {
    let mut actions = Vec::new();
    let mut lines = Vec::new();

    for node in store.nodes() {
        let full_path = path::with_root(&node.path, root);
        if node.flags.deleted {
            lines.push(format!("Delete: {full_path}"));
            actions.push(CommitAction::delete(full_path));
        } else if node.flags.new {
            if let Some(payload) = &node.payload {
                lines.push(format!("Create: {full_path}"));
                actions.push(CommitAction::create(full_path, STANDARD.encode(payload)));
            }
        }
    }

    lines.sort();
    debug!(actions = actions.len(), "built commit plan");

    CommitPlan {
        actions,
        message: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_stage::FileUpload;
    use canopy_types::{ActionKind, ContentEncoding, EntryKind, RemoteEntry};

    fn ingested() -> StageStore {
        let mut store = StageStore::new();
        store.ingest(
            &[
                RemoteEntry::new("t1", "root/a", EntryKind::Folder),
                RemoteEntry::new("b1", "root/a/b.txt", EntryKind::File),
                RemoteEntry::new("b2", "root/z.txt", EntryKind::File),
            ],
            "root",
        );
        store
    }

    #[test]
    fn unmodified_store_yields_empty_plan() {
        let plan = build_plan(&ingested(), "root");
        assert!(plan.is_empty());
        assert_eq!(plan.message, "");
    }

    #[test]
    fn staged_delete_yields_delete_action() {
        let mut store = ingested();
        store.delete("a/b.txt").unwrap();

        let plan = build_plan(&store, "root");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.actions[0], CommitAction::delete("root/a/b.txt"));
        assert_eq!(plan.message, "Delete: root/a/b.txt");
    }

    #[test]
    fn staged_file_yields_base64_create_action() {
        let mut store = ingested();
        store
            .create_files("a", vec![FileUpload::new("new.txt", b"hello".to_vec())])
            .unwrap();

        let plan = build_plan(&store, "root");
        assert_eq!(plan.len(), 1);
        let action = &plan.actions[0];
        assert_eq!(action.action, ActionKind::Create);
        assert_eq!(action.file_path, "root/a/new.txt");
        assert_eq!(action.content.as_deref(), Some("aGVsbG8="));
        assert_eq!(action.encoding, Some(ContentEncoding::Base64));
        assert_eq!(plan.message, "Create: root/a/new.txt");
    }

    #[test]
    fn new_folders_emit_no_action_and_no_line() {
        let mut store = ingested();
        store.create_folder("a", "empty-dir").unwrap();

        let plan = build_plan(&store, "root");
        assert!(plan.is_empty());
        assert_eq!(plan.message, "");
    }

    #[test]
    fn deleted_then_recreated_path_round_trips_to_empty() {
        let mut store = ingested();
        store
            .create_files("", vec![FileUpload::new("tmp.txt", b"x".to_vec())])
            .unwrap();
        store.delete("tmp.txt").unwrap();

        let plan = build_plan(&store, "root");
        assert!(plan.actions.iter().all(|a| a.file_path != "root/tmp.txt"));
        assert!(plan.is_empty());
    }

    #[test]
    fn message_lines_sort_lexicographically() {
        let mut store = ingested();
        // Stage the delete first, the create second; the message must not
        // follow insertion order.
        store.delete("z.txt").unwrap();
        store
            .create_files("", vec![FileUpload::new("a-new.txt", b"n".to_vec())])
            .unwrap();

        let plan = build_plan(&store, "root");
        assert_eq!(
            plan.message,
            "Create: root/a-new.txt\nDelete: root/z.txt"
        );
    }

    #[test]
    fn empty_root_omits_prefix() {
        let mut store = StageStore::new();
        store.ingest(&[RemoteEntry::new("b", "top.txt", EntryKind::File)], "");
        store.delete("top.txt").unwrap();

        let plan = build_plan(&store, "");
        assert_eq!(plan.actions[0].file_path, "top.txt");
        assert_eq!(plan.message, "Delete: top.txt");
    }

    #[test]
    fn hover_target_never_reaches_the_plan() {
        let mut store = ingested();
        store.set_hover("a");
        let plan = build_plan(&store, "root");
        assert!(plan.is_empty());
    }

    #[test]
    fn spec_scenario_delete_under_root() {
        let mut store = StageStore::new();
        store.ingest(
            &[
                RemoteEntry::new("b1", "a/b.txt", EntryKind::File),
                RemoteEntry::new("t1", "a", EntryKind::Folder),
            ],
            "root",
        );
        store.delete("a/b.txt").unwrap();

        let plan = build_plan(&store, "root");
        assert_eq!(plan.actions, vec![CommitAction::delete("root/a/b.txt")]);
        assert_eq!(plan.message, "Delete: root/a/b.txt");
    }
}
