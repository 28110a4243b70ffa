//! Embedding facade for Canopy.
//!
//! [`Explorer`] owns the staged-tree store and drives the full lifecycle
//! against a remote repository: ingest, staging operations, commit plan
//! confirmation, submission, and the post-commit refetch. The embedding
//! shell supplies an [`ExplorerConfig`] and a transport; everything else
//! goes through this crate.
//!
//! # Key Types
//!
//! - [`Explorer`] — The engine instance; exclusive owner of its store
//! - [`ExplorerConfig`] — The four host parameters plus the target branch
//! - [`HoverScheduler`] — Cancellable leading/trailing hover coalescer

pub mod config;
pub mod error;
pub mod explorer;
pub mod hover;

pub use config::{ExplorerConfig, DEFAULT_BRANCH};
pub use error::{ExplorerError, ExplorerResult};
pub use explorer::Explorer;
pub use hover::{HoverScheduler, DEFAULT_HOVER_WINDOW};
