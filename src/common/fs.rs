//! File tree moves and copies

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use walkdir::WalkDir;

/// Copy the contents of `src` into `dst`, creating directories as needed
///
/// Existing files in `dst` are overwritten; files only in `dst` are kept.
/// Symbolic links are recreated, not followed.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let link = fs::read_link(src)?;
    if dst.symlink_metadata().is_ok() {
        fs::remove_file(dst)?;
    }
    std::os::unix::fs::symlink(link, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        copy_tree(src, dst)
    } else {
        fs::copy(src, dst).map(|_| ())
    }
}

/// Move `from` to `to` (file, link or directory)
///
/// Uses a rename; when `from` and `to` are on different filesystems the entry
/// is copied and the source removed afterwards.
pub fn move_entry(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::CrossesDevices => {
            log::debug!("{} is on another device, copying", from.display());
            copy_then_remove(from, to)
        }
        Err(err) => Err(err),
    }
}

fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    let metadata = from.symlink_metadata()?;
    if metadata.is_dir() {
        copy_tree(from, to)?;
        fs::remove_dir_all(from)
    } else if metadata.file_type().is_symlink() {
        copy_symlink(from, to)?;
        fs::remove_file(from)
    } else {
        fs::copy(from, to)?;
        fs::remove_file(from)
    }
}
