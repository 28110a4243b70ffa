//! Commit plan builder for Canopy.
//!
//! Converts the staged divergence held by a
//! [`StageStore`](canopy_stage::StageStore) into an ordered list of atomic
//! commit actions plus a human-readable summary message, ready for a single
//! multi-action commit submission.

pub mod plan;

pub use plan::{build_plan, CommitPlan};
