//! The explorer lifecycle: ingest, stage, plan, submit, refetch.

use std::sync::Arc;
use std::time::Instant;

use canopy_plan::{build_plan, CommitPlan};
use canopy_stage::{build, FileUpload, StageStore, TreeSnapshot};
use canopy_remote::{CommitInfo, ListTreeOptions, RemoteRepository};
use tracing::{debug, info};

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult};
use crate::hover::HoverScheduler;

/// One explorer instance: the exclusive owner of its staged-tree store.
///
/// All mutation goes through this type; the store and its baseline are
/// never handed out mutably. Staging operations are synchronous; only
/// listing retrieval and commit submission await the remote.
pub struct Explorer {
    config: ExplorerConfig,
    remote: Arc<dyn RemoteRepository>,
    store: StageStore,
    hover: HoverScheduler,
    pending: Option<CommitPlan>,
}

impl Explorer {
    pub fn new(config: ExplorerConfig, remote: Arc<dyn RemoteRepository>) -> Self {
        Self {
            config,
            remote,
            store: StageStore::new(),
            hover: HoverScheduler::default(),
            pending: None,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &StageStore {
        &self.store
    }

    // ---------------------------------------------------------------
    // Ingestion
    // ---------------------------------------------------------------

    /// Fetch the remote listing and rebuild the baseline, discarding all
    /// staged state and any pending plan.
    ///
    /// Without a configured repository path this fetches nothing and
    /// yields an empty tree.
    pub async fn refresh(&mut self) -> ExplorerResult<TreeSnapshot> {
        if !self.config.is_ready() {
            debug!("no repository path configured; skipping fetch");
            self.store = StageStore::new();
            self.pending = None;
            return self.tree();
        }

        let listing = self
            .remote
            .list_tree(
                &self.config.repository_path,
                &ListTreeOptions::subtree(&self.config.root_path),
            )
            .await?;
        self.store.ingest(&listing, &self.config.root_path);
        self.pending = None;

        info!(
            repository = %self.config.repository_path,
            root = %self.config.root_path,
            entries = self.store.len(),
            "refreshed from remote"
        );
        self.tree()
    }

    /// Project the current store into a tree.
    pub fn tree(&self) -> ExplorerResult<TreeSnapshot> {
        Ok(build(&self.store)?)
    }

    /// Returns `true` if any staged edit diverges from the baseline.
    pub fn has_pending_changes(&self) -> ExplorerResult<bool> {
        Ok(self.tree()?.has_pending_changes)
    }

    // ---------------------------------------------------------------
    // Staging operations
    // ---------------------------------------------------------------

    pub fn create_folder(&mut self, parent: &str, name: &str) -> ExplorerResult<TreeSnapshot> {
        self.store.create_folder(parent, name)?;
        self.tree()
    }

    pub fn create_files(
        &mut self,
        parent: &str,
        uploads: Vec<FileUpload>,
    ) -> ExplorerResult<TreeSnapshot> {
        self.store.create_files(parent, uploads)?;
        self.tree()
    }

    pub fn delete(&mut self, path: &str) -> ExplorerResult<TreeSnapshot> {
        self.store.delete(path)?;
        self.tree()
    }

    pub fn undelete(&mut self, path: &str) -> ExplorerResult<TreeSnapshot> {
        self.store.undelete(path)?;
        self.tree()
    }

    /// Discard every staged edit, restoring the last-fetched baseline.
    pub fn reset(&mut self) -> ExplorerResult<TreeSnapshot> {
        self.store.reset();
        self.tree()
    }

    // ---------------------------------------------------------------
    // Drag-hover placeholder
    // ---------------------------------------------------------------

    /// A file drag moved over `parent` at `now`. Returns a rebuilt tree
    /// only when the placeholder actually moved; coalesced or redundant
    /// events yield `None`.
    pub fn drag_over(
        &mut self,
        parent: &str,
        now: Instant,
    ) -> ExplorerResult<Option<TreeSnapshot>> {
        if let Some(target) = self.hover.offer(parent, now) {
            if self.store.set_hover(&target) {
                return Ok(Some(self.tree()?));
            }
        }
        Ok(None)
    }

    /// Release a deferred hover update if its window has closed.
    pub fn drag_tick(&mut self, now: Instant) -> ExplorerResult<Option<TreeSnapshot>> {
        if let Some(target) = self.hover.poll(now) {
            if self.store.set_hover(&target) {
                return Ok(Some(self.tree()?));
            }
        }
        Ok(None)
    }

    /// The drag ended or left the drop target: suppress any in-flight
    /// update and remove the placeholder.
    pub fn drag_end(&mut self) -> ExplorerResult<Option<TreeSnapshot>> {
        self.hover.cancel();
        if self.store.clear_hover() {
            Ok(Some(self.tree()?))
        } else {
            Ok(None)
        }
    }

    // ---------------------------------------------------------------
    // Commit lifecycle
    // ---------------------------------------------------------------

    /// Build the commit plan from the current divergence and hold it for
    /// confirmation. Errors when nothing is staged.
    pub fn begin_commit(&mut self) -> ExplorerResult<&CommitPlan> {
        let plan = build_plan(&self.store, &self.config.root_path);
        if plan.is_empty() {
            return Err(ExplorerError::NothingToCommit);
        }
        Ok(self.pending.insert(plan))
    }

    /// The plan awaiting confirmation, if any.
    pub fn pending_plan(&self) -> Option<&CommitPlan> {
        self.pending.as_ref()
    }

    /// Discard the pending plan without touching staged state.
    pub fn cancel_commit(&mut self) -> Option<CommitPlan> {
        self.pending.take()
    }

    /// Submit the pending plan. On success the staged state is discarded
    /// by a fresh ingest; on failure both the store and the pending plan
    /// are left untouched so the user can retry or cancel.
    pub async fn submit_commit(&mut self) -> ExplorerResult<(CommitInfo, TreeSnapshot)> {
        let plan = self.pending.as_ref().ok_or(ExplorerError::NoPendingPlan)?;

        let commit = self
            .remote
            .create_commit(
                &self.config.repository_path,
                &self.config.branch,
                &plan.message,
                &plan.actions,
            )
            .await?;

        self.pending = None;
        let snapshot = self.refresh().await?;
        Ok((commit, snapshot))
    }
}
