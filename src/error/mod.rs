//! Error types and handling for wpenv
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`fs`]: Workspace and relocation errors
//! - [`git`]: Repository fetch errors
//! - [`config`]: Configuration file and provisioning seed errors
//! - [`snapshot`]: Snapshot restore errors

pub mod config;
pub mod fs;
pub mod git;
pub mod snapshot;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for wpenv operations
#[derive(Error, Diagnostic, Debug)]
pub enum WpenvError {
    // Fetch errors
    #[error("Invalid repository URL: '{url}'")]
    #[diagnostic(
        code(wpenv::git::invalid_url),
        help("Pass a remote URL such as https://github.com/org/site.git or git@github.com:org/site.git")
    )]
    InvalidUrl { url: String },

    #[error("Failed to clone repository {url}: {reason}")]
    #[diagnostic(
        code(wpenv::git::clone_failed),
        help("Check that the URL is correct and you have access to the repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Branch '{branch}' does not exist in {url}")]
    #[diagnostic(
        code(wpenv::git::branch_not_found),
        help("Pass an existing branch with --branch")
    )]
    GitBranchNotFound { url: String, branch: String },

    // Workspace and filesystem errors
    #[error("Failed to create staging directory under {base}: {reason}")]
    #[diagnostic(code(wpenv::workspace::create_failed))]
    WorkspaceCreateFailed { base: String, reason: String },

    #[error("Destination {path} already contains files")]
    #[diagnostic(
        code(wpenv::relocate::conflict),
        help("Remove the directory or choose another mountPoint in the config file")
    )]
    RelocationConflict { path: String },

    #[error("Failed to move {from} to {to}: {reason}")]
    #[diagnostic(code(wpenv::relocate::failed))]
    RelocationFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(wpenv::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Failed to read configuration file {path}: {reason}")]
    #[diagnostic(code(wpenv::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(
        code(wpenv::config::parse_failed),
        help("The configuration file must be a YAML or JSON mapping")
    )]
    ConfigParseFailed { path: String, reason: String },

    // Provisioning errors
    #[error("Invalid configuration value for '{key}': {reason}")]
    #[diagnostic(code(wpenv::environment::config_invalid))]
    ConfigInvalid { key: String, reason: String },

    #[error("Invalid hostname '{hostname}': {reason}")]
    #[diagnostic(code(wpenv::environment::invalid_hostname))]
    InvalidHostname { hostname: String, reason: String },

    #[error("Invalid mount point '{mount_point}': {reason}")]
    #[diagnostic(
        code(wpenv::environment::invalid_mount_point),
        help("Use a path relative to the WordPress root, e.g. wp-content or wp-content/themes/site")
    )]
    InvalidMountPoint { mount_point: String, reason: String },

    #[error("Environment '{name}' already exists at {path}")]
    #[diagnostic(
        code(wpenv::environment::exists),
        help("Pick another hostname or remove the existing environment")
    )]
    EnvironmentExists { name: String, path: String },

    #[error("Failed to provision environment: {message}")]
    #[diagnostic(code(wpenv::environment::provisioning_failed))]
    ProvisioningFailed { message: String },

    // Snapshot errors
    #[error("Snapshot store not found at {path}")]
    #[diagnostic(
        code(wpenv::snapshot::store_not_found),
        help("Set WPENV_SNAPSHOTS_DIR or pass --snapshots-dir")
    )]
    SnapshotStoreNotFound { path: String },

    #[error("Snapshot '{name}' not found")]
    #[diagnostic(code(wpenv::snapshot::not_found))]
    SnapshotNotFound { name: String },

    #[error("Failed to restore snapshot '{name}': {reason}")]
    #[diagnostic(code(wpenv::snapshot::restore_failed))]
    SnapshotRestoreFailed { name: String, reason: String },

    #[error("Pipeline has already run and ended in state {state}")]
    #[diagnostic(code(wpenv::pipeline::already_ran))]
    PipelineAlreadyRan { state: String },

    // Interaction errors
    #[error("Cancelled: {operation}")]
    #[diagnostic(code(wpenv::prompt::cancelled))]
    Cancelled { operation: String },

    #[error("Prompt failed: {message}")]
    #[diagnostic(
        code(wpenv::prompt::failed),
        help("Interactive questions need a terminal; pre-answer them in the config file")
    )]
    PromptFailed { message: String },
}

impl WpenvError {
    /// Whether this error came from the user backing out of a prompt
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WpenvError::Cancelled { .. })
    }
}

impl From<std::io::Error> for WpenvError {
    fn from(err: std::io::Error) -> Self {
        WpenvError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WpenvError {
    fn from(err: serde_json::Error) -> Self {
        WpenvError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for WpenvError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => WpenvError::Cancelled {
                operation: "prompt".to_string(),
            },
            other => WpenvError::PromptFailed {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, WpenvError>;
