//! Commit actions: the atomic units of a multi-action repository commit.

use serde::{Deserialize, Serialize};

/// The kind of change an action applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Delete,
}

/// Content encoding for `create` actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    Text,
    Base64,
}

/// One atomic action of a commit, in the shape the commit endpoint accepts.
///
/// `previous_path` is part of the wire shape (used by move actions) but is
/// never produced by the plan builder; renames are staged as separate
/// delete and create actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAction {
    pub action: ActionKind,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<ContentEncoding>,
}

impl CommitAction {
    /// A `create` action carrying base64-encoded content.
    pub fn create(file_path: impl Into<String>, content_base64: impl Into<String>) -> Self {
        Self {
            action: ActionKind::Create,
            file_path: file_path.into(),
            previous_path: None,
            content: Some(content_base64.into()),
            encoding: Some(ContentEncoding::Base64),
        }
    }

    /// A `delete` action for the given path.
    pub fn delete(file_path: impl Into<String>) -> Self {
        Self {
            action: ActionKind::Delete,
            file_path: file_path.into(),
            previous_path: None,
            content: None,
            encoding: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_action_shape() {
        let action = CommitAction::create("root/a.txt", "aGVsbG8=");
        assert_eq!(action.action, ActionKind::Create);
        assert_eq!(action.encoding, Some(ContentEncoding::Base64));
        assert_eq!(action.content.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn delete_action_has_no_content() {
        let action = CommitAction::delete("root/a.txt");
        assert_eq!(action.action, ActionKind::Delete);
        assert!(action.content.is_none());
        assert!(action.encoding.is_none());
    }

    #[test]
    fn delete_serializes_without_optional_fields() {
        let json = serde_json::to_value(CommitAction::delete("root/a.txt")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "action": "delete", "file_path": "root/a.txt" })
        );
    }

    #[test]
    fn create_serializes_wire_shape() {
        let json = serde_json::to_value(CommitAction::create("root/a.txt", "Zm9v")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "create",
                "file_path": "root/a.txt",
                "content": "Zm9v",
                "encoding": "base64",
            })
        );
    }
}
