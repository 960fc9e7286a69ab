//! Environment provisioning
//!
//! This module handles:
//! - Reading the keys a repository config may pre-answer ([`seed`])
//! - Hostname and mount point validation ([`validate`])
//! - The interactive question flow and the on-disk environment ([`create`])
//! - The `wpenv.json` manifest written at the environment root ([`manifest`])

pub mod create;
pub mod manifest;
pub mod seed;
pub mod validate;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ResolvedConfiguration;
use crate::error::Result;

pub use create::{DEFAULT_MOUNT_POINT, InteractiveProvisioner};

/// Environments directory name under the home directory
const ENVIRONMENTS_DIR: &str = "wp-local-docker-environments";

/// Get the default environments directory (`~/wp-local-docker-environments`)
pub fn default_environments_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(ENVIRONMENTS_DIR))
}

/// Hosts an environment answers on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Domain {
    Single(String),
    /// Primary host first, no duplicates
    Multiple(Vec<String>),
}

impl Domain {
    /// Build from a primary host and extra hosts, dropping repeats
    pub fn from_hosts(primary: String, extra: impl IntoIterator<Item = String>) -> Self {
        let mut hosts = vec![primary];
        for host in extra {
            if !hosts.contains(&host) {
                hosts.push(host);
            }
        }

        if hosts.len() == 1 {
            Domain::Single(hosts.remove(0))
        } else {
            Domain::Multiple(hosts)
        }
    }

    /// All hosts in order
    pub fn hosts(&self) -> &[String] {
        match self {
            Domain::Single(host) => std::slice::from_ref(host),
            Domain::Multiple(hosts) => hosts,
        }
    }

    pub fn primary(&self) -> Option<&str> {
        self.hosts().first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPressPaths {
    /// WordPress document root inside the environment
    pub wordpress: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPressSettings {
    pub https: bool,
    pub paths: WordPressPaths,
}

/// What provisioning produced; read by relocation, snapshot restore and the
/// summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningResult {
    /// Environment slug
    pub name: String,
    /// Environment directory
    pub root: PathBuf,
    /// Repository location relative to the WordPress root
    pub mount_point: Option<String>,
    /// Snapshot ID or project name to restore
    pub snapshot: Option<String>,
    pub domain: Domain,
    pub wordpress: WordPressSettings,
}

impl ProvisioningResult {
    /// Scheme the site is served on
    pub fn scheme(&self) -> &'static str {
        if self.wordpress.https { "https" } else { "http" }
    }
}

/// Collects environment settings and creates the environment definition
pub trait EnvironmentProvisioner {
    fn provision(&self, config: Option<&ResolvedConfiguration>) -> Result<ProvisioningResult>;
}
