//! Pipeline stages and states

use std::fmt;

/// A unit of work in a clone run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateRequest,
    AcquireWorkspace,
    Fetch,
    ResolveConfig,
    Provision,
    Relocate,
    RestoreSnapshot,
    Report,
}

impl Stage {
    /// Progress message while the stage runs
    pub fn label(self) -> &'static str {
        match self {
            Stage::ValidateRequest => "Checking request",
            Stage::AcquireWorkspace => "Creating staging directory",
            Stage::Fetch => "Cloning repository",
            Stage::ResolveConfig => "Reading configuration",
            Stage::Provision => "Creating environment",
            Stage::Relocate => "Moving files into place",
            Stage::RestoreSnapshot => "Restoring snapshot",
            Stage::Report => "Preparing summary",
        }
    }

    /// Message once the stage has finished
    pub fn done_label(self) -> &'static str {
        match self {
            Stage::ValidateRequest => "Request checked",
            Stage::AcquireWorkspace => "Staging directory created",
            Stage::Fetch => "Repository cloned",
            Stage::ResolveConfig => "Configuration read",
            Stage::Provision => "Environment created",
            Stage::Relocate => "Files moved into place",
            Stage::RestoreSnapshot => "Snapshot restored",
            Stage::Report => "Summary prepared",
        }
    }

    /// State reached when the stage succeeds, if it has one of its own
    pub(super) fn completed_state(self) -> Option<PipelineState> {
        match self {
            Stage::ValidateRequest => None,
            Stage::AcquireWorkspace => Some(PipelineState::WorkspaceAcquired),
            Stage::Fetch => Some(PipelineState::Fetched),
            Stage::ResolveConfig => Some(PipelineState::ConfigResolved),
            Stage::Provision => Some(PipelineState::Provisioned),
            Stage::Relocate => Some(PipelineState::Relocated),
            // only when something was restored
            Stage::RestoreSnapshot => None,
            Stage::Report => Some(PipelineState::Reported),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a run is. Transitions only move forward; `End` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    WorkspaceAcquired,
    Fetched,
    ConfigResolved,
    Provisioned,
    Relocated,
    SnapshotRestored,
    Reported,
    End,
    Failed { at: Stage },
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::End | PipelineState::Failed { .. })
    }
}
