//! Wire types for the GitLab REST API.

use canopy_types::{CommitAction, EntryKind, RemoteEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, RemoteResult};

/// One row of `GET /projects/:id/repository/tree`.
#[derive(Clone, Debug, Deserialize)]
pub struct TreeEntryDto {
    pub id: String,
    #[serde(default)]
    pub mode: String,
    pub name: String,
    pub path: String,
    /// `blob` for files, `tree` for folders.
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl TreeEntryDto {
    /// Map the wire row into an engine-facing entry.
    pub fn into_remote_entry(self) -> RemoteResult<RemoteEntry> {
        let kind = match self.entry_type.as_str() {
            "blob" => EntryKind::File,
            "tree" => EntryKind::Folder,
            other => {
                return Err(RemoteError::InvalidResponse(format!(
                    "unknown tree entry type {other:?} at {}",
                    self.path
                )))
            }
        };
        Ok(RemoteEntry {
            id: self.id,
            mode: self.mode,
            name: self.name,
            path: self.path,
            kind,
        })
    }
}

/// Body of `POST /projects/:id/repository/commits`.
#[derive(Debug, Serialize)]
pub struct CommitRequest<'a> {
    pub branch: &'a str,
    pub commit_message: &'a str,
    pub actions: &'a [CommitAction],
}

/// The committed result, as reported by the remote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub id: String,
    #[serde(default)]
    pub short_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_row_maps_to_file() {
        let dto: TreeEntryDto = serde_json::from_value(serde_json::json!({
            "id": "a1b2c3",
            "mode": "100644",
            "name": "intro.md",
            "path": "docs/intro.md",
            "type": "blob",
        }))
        .unwrap();
        let entry = dto.into_remote_entry().unwrap();
        assert_eq!(entry.kind, EntryKind::File);
        assert_eq!(entry.path, "docs/intro.md");
        assert_eq!(entry.mode, "100644");
    }

    #[test]
    fn tree_row_maps_to_folder() {
        let dto: TreeEntryDto = serde_json::from_value(serde_json::json!({
            "id": "d4e5f6",
            "name": "docs",
            "path": "docs",
            "type": "tree",
        }))
        .unwrap();
        assert_eq!(dto.into_remote_entry().unwrap().kind, EntryKind::Folder);
    }

    #[test]
    fn unknown_row_type_is_rejected() {
        let dto = TreeEntryDto {
            id: "x".into(),
            mode: String::new(),
            name: "weird".into(),
            path: "weird".into(),
            entry_type: "commit".into(),
        };
        assert!(matches!(
            dto.into_remote_entry(),
            Err(RemoteError::InvalidResponse(_))
        ));
    }

    #[test]
    fn commit_request_serializes_wire_shape() {
        let actions = vec![CommitAction::delete("root/a.txt")];
        let request = CommitRequest {
            branch: "master",
            commit_message: "Delete: root/a.txt",
            actions: &actions,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["branch"], "master");
        assert_eq!(json["commit_message"], "Delete: root/a.txt");
        assert_eq!(json["actions"][0]["action"], "delete");
    }

    #[test]
    fn commit_info_tolerates_minimal_body() {
        let info: CommitInfo =
            serde_json::from_value(serde_json::json!({ "id": "abc123" })).unwrap();
        assert_eq!(info.id, "abc123");
        assert!(info.created_at.is_none());
    }
}
