//! Moving the fetched tree into the environment
//!
//! Everything in the staging directory, `.git` included, ends up under
//! `<wordpress root>/<mount point>`. The destination has to be absent or
//! empty; an occupied destination is refused before anything moves.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::move_entry;
use crate::environment::validate;
use crate::error::{self, Result, WpenvError};
use crate::workspace::Workspace;

/// Moves the workspace contents under the WordPress root
pub trait ContentRelocator {
    /// Returns the destination directory
    fn relocate(&self, workspace: &Workspace, wordpress_root: &Path, subpath: &str)
    -> Result<PathBuf>;
}

/// Local filesystem relocator
#[derive(Debug, Default, Clone, Copy)]
pub struct FsRelocator;

impl ContentRelocator for FsRelocator {
    fn relocate(
        &self,
        workspace: &Workspace,
        wordpress_root: &Path,
        subpath: &str,
    ) -> Result<PathBuf> {
        let destination = wordpress_root.join(validate::mount_point(subpath)?);
        ensure_vacant(&destination)?;

        fs::create_dir_all(&destination)
            .map_err(|e| error::fs::move_failed(workspace.path(), &destination, e))?;

        let entries = fs::read_dir(workspace.path()).map_err(|e| {
            error::fs::io_error(format!("cannot read {}: {e}", workspace.path().display()))
        })?;

        let mut moved = 0usize;
        for entry in entries {
            let entry = entry?;
            let from = entry.path();
            let to = destination.join(entry.file_name());
            move_entry(&from, &to).map_err(|e| error::fs::move_failed(&from, &to, e))?;
            moved += 1;
        }

        log::debug!("moved {moved} entries into {}", destination.display());
        Ok(destination)
    }
}

fn ensure_vacant(destination: &Path) -> Result<()> {
    if destination.symlink_metadata().is_err() {
        return Ok(());
    }

    let conflict = || WpenvError::RelocationConflict {
        path: destination.display().to_string(),
    };
    if !destination.is_dir() {
        return Err(conflict());
    }

    let mut entries = fs::read_dir(destination)?;
    if entries.next().is_some() {
        return Err(conflict());
    }
    Ok(())
}
