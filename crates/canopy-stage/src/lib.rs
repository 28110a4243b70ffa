//! Staged-tree engine for Canopy.
//!
//! Tracks a subtree of a remote repository as a flat path-keyed map, stages
//! local edits (uploads, folder creation, deletions, undeletions) against it
//! without touching the remote, and projects the map into a hierarchical
//! tree on demand. A retained baseline snapshot supports resetting to the
//! last-fetched remote state at any time.
//!
//! # Key Types
//!
//! - [`StageStore`] — The authoritative flat map plus baseline and hover target
//! - [`Node`] — One file or folder entry with its staged flags
//! - [`TreeSnapshot`] — Derived hierarchical projection plus the pending flag
//! - [`FileUpload`] — Name and raw bytes of a file being staged

pub mod error;
pub mod node;
pub mod store;
pub mod tree;

pub use error::{StageError, StageResult};
pub use node::{FileUpload, Node, NodeFlags};
pub use store::StageStore;
pub use tree::{build, TreeNode, TreeSnapshot};
