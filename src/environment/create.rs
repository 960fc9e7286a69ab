//! Interactive environment creation
//!
//! Questions already answered by the repository config are skipped. The
//! environment directory is created only after every answer is known, so a
//! cancelled question leaves nothing behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use console::style;

use super::manifest::EnvironmentManifest;
use super::seed::{EnvironmentSeed, SnapshotChoice};
use super::validate;
use super::{Domain, EnvironmentProvisioner, ProvisioningResult, WordPressPaths, WordPressSettings};
use crate::config::ResolvedConfiguration;
use crate::error::{Result, WpenvError};
use crate::prompt::Prompter;

pub const Q_HOSTNAME: &str = "What is the primary hostname for your site? (Ex: docker.test)";
pub const Q_EXTRA_HOSTS: &str = "Are there additional domains the site should respond to?";
pub const Q_EXTRA_HOST_LIST: &str =
    "Enter additional domains separated by commas (Ex: second.test, third.test)";
pub const Q_MOUNT_POINT: &str =
    "Where should the repository be placed, relative to the WordPress root?";
pub const Q_HTTPS: &str = "Do you want to use HTTPS?";
pub const Q_SNAPSHOT: &str = "Do you want to restore a snapshot into this environment?";
pub const Q_SNAPSHOT_NAME: &str = "Snapshot ID or project name:";

/// Mount point offered when the config does not set one
pub const DEFAULT_MOUNT_POINT: &str = "wp-content";

/// WordPress document root inside an environment directory
const WORDPRESS_DIR: &str = "wordpress";

/// Asks for environment settings and creates the environment directory
pub struct InteractiveProvisioner<'p> {
    prompter: &'p dyn Prompter,
    environments_root: PathBuf,
}

impl<'p> InteractiveProvisioner<'p> {
    /// Environments are created as subdirectories of `environments_root`
    pub fn new(prompter: &'p dyn Prompter, environments_root: impl Into<PathBuf>) -> Self {
        Self {
            prompter,
            environments_root: environments_root.into(),
        }
    }

    /// Ask until `check` accepts the answer
    ///
    /// Validation errors are shown and the question repeated; any other
    /// error (cancellation included) is returned.
    fn ask_valid<T>(
        &self,
        message: &str,
        default: Option<&str>,
        check: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        loop {
            let answer = self.prompter.text(message, default)?;
            match check(&answer) {
                Ok(value) => return Ok(value),
                Err(
                    err @ (WpenvError::InvalidHostname { .. } | WpenvError::InvalidMountPoint { .. }),
                ) => {
                    eprintln!("{} {err}", style("✖").red());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn ask_extra_hosts(&self) -> Result<Vec<String>> {
        if !self.prompter.confirm(Q_EXTRA_HOSTS, false)? {
            return Ok(Vec::new());
        }
        self.ask_valid(Q_EXTRA_HOST_LIST, None, validate::host_list)
    }

    fn ask_snapshot(&self) -> Result<Option<String>> {
        if !self.prompter.confirm(Q_SNAPSHOT, false)? {
            return Ok(None);
        }
        loop {
            let name = self.prompter.text(Q_SNAPSHOT_NAME, None)?;
            let name = name.trim();
            if !name.is_empty() {
                return Ok(Some(name.to_string()));
            }
        }
    }
}

impl EnvironmentProvisioner for InteractiveProvisioner<'_> {
    fn provision(&self, config: Option<&ResolvedConfiguration>) -> Result<ProvisioningResult> {
        let seed = EnvironmentSeed::from_config(config)?;

        let hostname = match seed.hostname {
            Some(hostname) => hostname,
            None => self.ask_valid(Q_HOSTNAME, None, validate::hostname)?,
        };

        let name = validate::slug(&hostname);
        let root = self.environments_root.join(&name);
        if root.exists() {
            return Err(environment_exists(&name, &root));
        }

        let extra_hosts = match seed.extra_hosts {
            Some(hosts) => hosts,
            None => self.ask_extra_hosts()?,
        };
        let mount_point = match seed.mount_point {
            Some(mount_point) => mount_point,
            None => self.ask_valid(Q_MOUNT_POINT, Some(DEFAULT_MOUNT_POINT), validate::mount_point)?,
        };
        let https = match seed.https {
            Some(https) => https,
            None => self.prompter.confirm(Q_HTTPS, false)?,
        };
        let snapshot = match seed.snapshot {
            Some(SnapshotChoice::Restore(name)) => Some(name),
            Some(SnapshotChoice::Skip) => None,
            None => self.ask_snapshot()?,
        };

        let wordpress = root.join(WORDPRESS_DIR);
        let result = ProvisioningResult {
            name,
            root,
            mount_point: Some(mount_point),
            snapshot,
            domain: Domain::from_hosts(hostname, extra_hosts),
            wordpress: WordPressSettings {
                https,
                paths: WordPressPaths { wordpress },
            },
        };

        materialize(&result)?;
        log::info!(
            "created environment '{}' for {} at {}",
            result.name,
            result.domain.primary().unwrap_or_default(),
            result.root.display()
        );
        Ok(result)
    }
}

fn environment_exists(name: &str, root: &Path) -> WpenvError {
    WpenvError::EnvironmentExists {
        name: name.to_string(),
        path: root.display().to_string(),
    }
}

fn create_failed(path: &Path, err: &io::Error) -> WpenvError {
    WpenvError::ProvisioningFailed {
        message: format!("cannot create {}: {err}", path.display()),
    }
}

/// Claim the environment root and lay out its tree
///
/// The root is created with `create_dir`, so a root that appeared while the
/// questions were being answered is still reported as taken.
fn materialize(result: &ProvisioningResult) -> Result<()> {
    if let Some(parent) = result.root.parent() {
        fs::create_dir_all(parent).map_err(|e| create_failed(parent, &e))?;
    }
    fs::create_dir(&result.root).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => environment_exists(&result.name, &result.root),
        _ => create_failed(&result.root, &e),
    })?;

    let wordpress = &result.wordpress.paths.wordpress;
    fs::create_dir_all(wordpress).map_err(|e| create_failed(wordpress, &e))?;
    EnvironmentManifest::from(result).write(&result.root)
}
