//! The clone pipeline
//!
//! Runs the stages of a clone in a fixed order:
//!
//! ```text
//! Start → WorkspaceAcquired → Fetched → ConfigResolved → Provisioned
//!       → Relocated → [SnapshotRestored] → Reported → End
//! ```
//!
//! Every collaborator is injected, so each stage can be replaced by a test
//! double. The first failing stage moves the pipeline to
//! [`PipelineState::Failed`] and the error is returned as is. Completed
//! stages are not undone: the environment stays provisioned and the staging
//! directory keeps whatever was left in it.

pub mod state;

use std::path::PathBuf;

use crate::config::{ConfigResolver, DEFAULT_CONFIG_FILE};
use crate::environment::{DEFAULT_MOUNT_POINT, EnvironmentProvisioner, ProvisioningResult};
use crate::error::{Result, WpenvError};
use crate::git::{RepositoryFetcher, url};
use crate::relocate::ContentRelocator;
use crate::report;
use crate::snapshot::SnapshotRestorer;
use crate::ui::ProgressReporter;
use crate::workspace::{Workspace, WorkspaceProvider};

pub use state::{PipelineState, Stage};

/// Branch cloned when none is given
pub const DEFAULT_BRANCH: &str = "master";

/// What to clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub remote_url: String,
    pub branch: String,
    /// Config file looked up at the repository root
    pub config_file_name: String,
}

impl PipelineRequest {
    pub fn new(remote_url: impl Into<String>) -> Self {
        Self {
            remote_url: remote_url.into(),
            branch: DEFAULT_BRANCH.to_string(),
            config_file_name: DEFAULT_CONFIG_FILE.to_string(),
        }
    }

    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    #[must_use]
    pub fn with_config_file(mut self, file_name: impl Into<String>) -> Self {
        self.config_file_name = file_name.into();
        self
    }
}

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct CloneOutcome {
    /// Staging directory, empty after relocation
    pub workspace: Workspace,
    pub provisioning: ProvisioningResult,
    /// Directory the repository was moved into
    pub destination: PathBuf,
    pub snapshot_restored: bool,
    /// Text for the user, see [`report::format`]
    pub summary: String,
}

/// Stage implementations used by a [`Pipeline`]
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub workspaces: &'a dyn WorkspaceProvider,
    pub fetcher: &'a dyn RepositoryFetcher,
    pub config: &'a dyn ConfigResolver,
    pub provisioner: &'a dyn EnvironmentProvisioner,
    pub relocator: &'a dyn ContentRelocator,
    pub restorer: &'a dyn SnapshotRestorer,
}

/// One clone run
pub struct Pipeline<'a> {
    parts: Collaborators<'a>,
    progress: &'a dyn ProgressReporter,
    state: PipelineState,
    workspace: Option<Workspace>,
}

impl<'a> Pipeline<'a> {
    pub fn new(parts: Collaborators<'a>, progress: &'a dyn ProgressReporter) -> Self {
        Self {
            parts,
            progress,
            state: PipelineState::Start,
            workspace: None,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Staging directory of this run, once acquired
    ///
    /// Still available after a failure so the user can be pointed at it.
    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    /// Run every stage once
    ///
    /// A pipeline runs a single time; later calls fail without touching any
    /// collaborator or the recorded state.
    pub fn run(&mut self, request: &PipelineRequest) -> Result<CloneOutcome> {
        if self.state != PipelineState::Start {
            return Err(WpenvError::PipelineAlreadyRan {
                state: format!("{:?}", self.state),
            });
        }

        self.stage(Stage::ValidateRequest, false, |_| url::validate(&request.remote_url))?;

        let workspace = self.stage(Stage::AcquireWorkspace, false, |p| p.parts.workspaces.acquire())?;
        log::info!("staging clone in {}", workspace.path().display());
        self.workspace = Some(workspace.clone());

        self.stage(Stage::Fetch, true, |p| {
            p.parts
                .fetcher
                .fetch(&workspace, &request.remote_url, &request.branch)
        })?;

        let config = self.stage(Stage::ResolveConfig, false, |p| {
            p.parts.config.resolve(&workspace, &request.config_file_name)
        })?;

        let provisioning =
            self.stage(Stage::Provision, true, |p| p.parts.provisioner.provision(config.as_ref()))?;

        let subpath = provisioning
            .mount_point
            .as_deref()
            .unwrap_or(DEFAULT_MOUNT_POINT);
        let destination = self.stage(Stage::Relocate, true, |p| {
            p.parts
                .relocator
                .relocate(&workspace, &provisioning.wordpress.paths.wordpress, subpath)
        })?;

        let show_restore = provisioning.snapshot.is_some();
        let snapshot_restored = self.stage(Stage::RestoreSnapshot, show_restore, |p| {
            p.parts.restorer.restore_if_requested(&provisioning)
        })?;
        if snapshot_restored {
            self.transition(PipelineState::SnapshotRestored);
        }

        let summary = self.stage(Stage::Report, false, |_| Ok(report::format(&provisioning)))?;
        self.transition(PipelineState::End);

        Ok(CloneOutcome {
            workspace,
            provisioning,
            destination,
            snapshot_restored,
            summary,
        })
    }

    /// Run one stage, recording the resulting state
    fn stage<T>(
        &mut self,
        stage: Stage,
        show_progress: bool,
        work: impl FnOnce(&Self) -> Result<T>,
    ) -> Result<T> {
        if show_progress {
            self.progress.stage_started(stage);
        }
        log::debug!("stage: {}", stage.label());

        match work(&*self) {
            Ok(value) => {
                if show_progress {
                    self.progress.stage_finished(stage);
                }
                if let Some(next) = stage.completed_state() {
                    self.transition(next);
                }
                Ok(value)
            }
            Err(err) => {
                if show_progress {
                    self.progress.stage_failed(stage);
                }
                log::debug!("stage '{}' failed: {err}", stage.label());
                self.transition(PipelineState::Failed { at: stage });
                Err(err)
            }
        }
    }

    fn transition(&mut self, next: PipelineState) {
        log::debug!("pipeline: {:?} -> {next:?}", self.state);
        self.state = next;
        if next.is_terminal() {
            log::debug!("pipeline finished");
        }
    }
}
