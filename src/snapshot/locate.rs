//! Snapshot store location

use std::path::PathBuf;

use super::SnapshotLocator;
use crate::error::{Result, WpenvError};

/// Store directory name under the home directory
const STORE_DIR: &str = ".wpsnapshots";

/// Get the default snapshot store path (`~/.wpsnapshots`)
pub fn default_store_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(STORE_DIR))
}

/// Uses an explicit directory, falling back to the default store
#[derive(Debug, Clone, Default)]
pub struct StoreLocator {
    dir: Option<PathBuf>,
}

impl StoreLocator {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

impl SnapshotLocator for StoreLocator {
    fn locate(&self) -> Result<PathBuf> {
        let store = self
            .dir
            .clone()
            .or_else(default_store_dir)
            .ok_or_else(|| WpenvError::SnapshotStoreNotFound {
                path: format!("~/{STORE_DIR}"),
            })?;

        if !store.is_dir() {
            return Err(WpenvError::SnapshotStoreNotFound {
                path: store.display().to_string(),
            });
        }
        Ok(dunce::canonicalize(&store).unwrap_or(store))
    }
}
