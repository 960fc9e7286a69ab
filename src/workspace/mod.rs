//! Staging workspace for a clone run
//!
//! Every pipeline run gets its own directory under the system temp root
//! (`wpld-XXXXXX`). The directory outlives the run: on
//! success the relocator leaves it empty, on failure it holds whatever the
//! failed stage left behind so the user can inspect it.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, WpenvError};

/// Prefix of every staging directory name
pub const STAGING_PREFIX: &str = "wpld-";

/// Returns the absolute base directory for staging directories.
///
/// A relative `TMPDIR` (e.g. `TMPDIR=tmp`) would put the clone under the
/// current working directory, so fall back to the platform temp root instead.
pub fn temp_dir_base() -> PathBuf {
    let candidate = env::temp_dir();
    if candidate.is_absolute() {
        return candidate;
    }

    #[cfg(windows)]
    {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}

/// A staging directory owned by one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    /// Wrap an existing directory as a workspace
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the directory exists and has no entries
    pub fn is_empty(&self) -> bool {
        std::fs::read_dir(&self.path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false)
    }
}

/// Allocates staging directories
pub trait WorkspaceProvider {
    fn acquire(&self) -> Result<Workspace>;
}

/// Allocates kept temp directories under a base directory
#[derive(Debug, Clone)]
pub struct TempWorkspaces {
    base: PathBuf,
}

impl TempWorkspaces {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for TempWorkspaces {
    fn default() -> Self {
        Self::new(temp_dir_base())
    }
}

impl WorkspaceProvider for TempWorkspaces {
    fn acquire(&self) -> Result<Workspace> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.base)
            .map_err(|e| WpenvError::WorkspaceCreateFailed {
                base: self.base.display().to_string(),
                reason: e.to_string(),
            })?;

        let path = dir.keep();
        log::debug!("acquired staging directory {}", path.display());
        Ok(Workspace::new(path))
    }
}
