//! Clone command
//!
//! Wires the terminal-backed collaborators into a [`Pipeline`] and prints
//! the summary. On failure the staging directory is named so the user can
//! look at what the failed stage left behind.

use std::path::PathBuf;

use console::{Term, style};

use crate::cli::CloneArgs;
use crate::config::FileConfigResolver;
use crate::environment::{InteractiveProvisioner, default_environments_dir};
use crate::error::{Result, WpenvError};
use crate::git::GitFetcher;
use crate::pipeline::{Collaborators, Pipeline, PipelineRequest};
use crate::prompt::InquirePrompter;
use crate::relocate::FsRelocator;
use crate::snapshot::{LocalSnapshotService, Restorer, StoreLocator};
use crate::ui::{
    ProgressReporter, SilentProgressReporter, SpinnerReporter, SuspendingPrompter, display,
};
use crate::workspace::TempWorkspaces;

/// Run the clone command
pub fn run(environments_dir: Option<PathBuf>, args: CloneArgs) -> Result<()> {
    let environments_root = environments_dir
        .or_else(default_environments_dir)
        .ok_or_else(|| WpenvError::ProvisioningFailed {
            message: "cannot determine the home directory, pass --environments-dir".to_string(),
        })?;
    log::debug!("environments directory: {}", environments_root.display());

    let interactive = Term::stderr().is_term();
    let spinners = SpinnerReporter::new();
    let progress: &dyn ProgressReporter = if interactive {
        &spinners
    } else {
        &SilentProgressReporter
    };
    let prompter = SuspendingPrompter::new(&InquirePrompter, spinners.multi());

    let workspaces = TempWorkspaces::default();
    let fetcher = if interactive {
        GitFetcher::new(&prompter)
    } else {
        GitFetcher::non_interactive()
    };
    let provisioner = InteractiveProvisioner::new(&prompter, environments_root);
    let restorer = Restorer::new(
        StoreLocator::new(args.snapshots_dir),
        LocalSnapshotService::new(&prompter),
        args.snapshots_image,
    );

    let mut pipeline = Pipeline::new(
        Collaborators {
            workspaces: &workspaces,
            fetcher: &fetcher,
            config: &FileConfigResolver,
            provisioner: &provisioner,
            relocator: &FsRelocator,
            restorer: &restorer,
        },
        progress,
    );

    let request = PipelineRequest::new(args.url)
        .with_branch(args.branch)
        .with_config_file(args.config);

    match pipeline.run(&request) {
        Ok(outcome) => {
            println!();
            display::print_summary(&outcome.summary);
            log::debug!(
                "environment '{}' has the repository at {}, snapshot restored: {}",
                outcome.provisioning.name,
                outcome.destination.display(),
                outcome.snapshot_restored
            );
            if !outcome.workspace.is_empty() {
                log::warn!(
                    "staging directory {} is not empty",
                    outcome.workspace.path().display()
                );
            }
            Ok(())
        }
        Err(err) => {
            log::debug!("pipeline stopped in state {:?}", pipeline.state());
            if let Some(workspace) = pipeline.workspace() {
                eprintln!(
                    "{} Staging directory kept at {}",
                    style("ℹ").cyan(),
                    dunce::simplified(workspace.path()).display()
                );
            }
            Err(err)
        }
    }
}
