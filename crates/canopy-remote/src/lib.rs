//! Remote repository boundary for Canopy.
//!
//! The engine consumes a remote repository through the
//! [`RemoteRepository`] trait: a recursive subtree listing and an atomic
//! multi-action commit submission. Two implementations are provided:
//!
//! - [`GitlabRemote`] — the GitLab REST API (`/api/v4`) over `reqwest`
//! - [`InMemoryRemote`] — a map-backed fake for unit tests and offline use
//!
//! Token acquisition is outside the engine's contract; callers hand a
//! ready [`AuthMethod`] to the client and keep refresh/redirect flows to
//! themselves. [`TokenRecord`] carries a persisted token with its expiry.

pub mod api;
pub mod auth;
pub mod error;
pub mod gitlab;
pub mod memory;
pub mod transport;

pub use api::CommitInfo;
pub use auth::{AuthMethod, TokenRecord};
pub use error::{RemoteError, RemoteResult};
pub use gitlab::GitlabRemote;
pub use memory::{CommitRecord, InMemoryRemote};
pub use transport::{ListTreeOptions, RemoteRepository};
