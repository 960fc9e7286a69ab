//! Snapshot store on the local filesystem
//!
//! Layout, one directory per snapshot:
//!
//! ```text
//! <store>/<id>/meta.json   {"id": "...", "project": "...", "description": "..."}
//! <store>/<id>/files/      tree copied over the WordPress root
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{RestoreRequest, SnapshotService};
use crate::common::fs::copy_tree;
use crate::error::{self, Result, WpenvError};
use crate::prompt::Prompter;

const META_FILE: &str = "meta.json";
const FILES_DIR: &str = "files";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotMeta {
    pub id: String,
    pub project: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl SnapshotMeta {
    fn label(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => format!("{} ({description})", self.id),
            _ => self.id.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredSnapshot {
    meta: SnapshotMeta,
    dir: PathBuf,
}

/// Restores snapshots from a directory store, asking which one to use when
/// a project name matches several
pub struct LocalSnapshotService<'p> {
    prompter: &'p dyn Prompter,
}

impl<'p> LocalSnapshotService<'p> {
    pub fn new(prompter: &'p dyn Prompter) -> Self {
        Self { prompter }
    }

    fn choose(&self, name: &str, mut candidates: Vec<StoredSnapshot>) -> Result<StoredSnapshot> {
        if candidates.len() == 1 {
            return Ok(candidates.remove(0));
        }

        let labels: Vec<String> = candidates.iter().map(|s| s.meta.label()).collect();
        let index = self.prompter.select(
            &format!("Several snapshots match '{name}'. Which one should be restored?"),
            &labels,
        )?;
        if index >= candidates.len() {
            return Err(WpenvError::SnapshotNotFound {
                name: name.to_string(),
            });
        }
        Ok(candidates.swap_remove(index))
    }
}

impl SnapshotService for LocalSnapshotService<'_> {
    fn restore(&self, store: &Path, request: &RestoreRequest<'_>) -> Result<()> {
        let name = request.snapshot;
        let snapshots = list_snapshots(store)?;

        let candidates: Vec<StoredSnapshot> =
            match snapshots.iter().find(|s| s.meta.id == name) {
                Some(exact) => vec![exact.clone()],
                None => snapshots
                    .into_iter()
                    .filter(|s| s.meta.project == name)
                    .collect(),
            };
        if candidates.is_empty() {
            return Err(WpenvError::SnapshotNotFound {
                name: name.to_string(),
            });
        }

        let snapshot = self.choose(name, candidates)?;
        let files = snapshot.dir.join(FILES_DIR);
        if !files.is_dir() {
            return Err(error::snapshot::restore_failed(
                &snapshot.meta.id,
                format!("{} has no {FILES_DIR} directory", snapshot.dir.display()),
            ));
        }

        copy_tree(&files, request.destination)
            .map_err(|e| error::snapshot::restore_failed(&snapshot.meta.id, e))?;

        log::info!(
            "restored snapshot {} ({}) into {} using {}",
            snapshot.meta.id,
            snapshot.meta.project,
            request.destination.display(),
            request.image
        );
        Ok(())
    }
}

/// Every readable snapshot in `store`, sorted by ID
fn list_snapshots(store: &Path) -> Result<Vec<StoredSnapshot>> {
    let entries = fs::read_dir(store).map_err(|_| WpenvError::SnapshotStoreNotFound {
        path: store.display().to_string(),
    })?;

    let mut snapshots = Vec::new();
    for entry in entries {
        let dir = entry?.path();
        let meta_path = dir.join(META_FILE);
        if !meta_path.is_file() {
            continue;
        }

        let parsed = fs::read_to_string(&meta_path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<SnapshotMeta>(&content).map_err(|e| e.to_string())
            });
        match parsed {
            Ok(meta) => snapshots.push(StoredSnapshot { meta, dir }),
            Err(e) => log::warn!("skipping unreadable snapshot {}: {e}", meta_path.display()),
        }
    }

    snapshots.sort_by(|a, b| a.meta.id.cmp(&b.meta.id));
    Ok(snapshots)
}
