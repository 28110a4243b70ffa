//! Foundation types for Canopy.
//!
//! This crate provides the types shared across the Canopy system: repository
//! listing entries, commit actions, and the path arithmetic used to key the
//! staged tree. Every other Canopy crate depends on `canopy-types`.
//!
//! # Key Types
//!
//! - [`EntryKind`] — File or folder, independent of any wire representation
//! - [`RemoteEntry`] — One entry of a flat repository listing
//! - [`CommitAction`] — One atomic action of a multi-action commit
//! - [`path`] — Parent/leaf/join helpers over `/`-separated repository paths

pub mod action;
pub mod entry;
pub mod path;

pub use action::{ActionKind, CommitAction, ContentEncoding};
pub use entry::{EntryKind, RemoteEntry};
