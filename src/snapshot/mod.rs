//! Snapshot restore
//!
//! When provisioning picked a snapshot, the restorer finds the snapshot
//! store ([`SnapshotLocator`]) and hands the snapshot to a
//! [`SnapshotService`] that writes it into the WordPress root. Without a
//! snapshot nothing is touched.

pub mod local;
pub mod locate;

use std::path::{Path, PathBuf};

use crate::environment::ProvisioningResult;
use crate::error::Result;

pub use local::LocalSnapshotService;
pub use locate::StoreLocator;

/// Image used to run snapshot tooling when none is configured
pub const DEFAULT_IMAGE: &str = "10up/wpsnapshots:latest";

/// Resolves where snapshots are stored
pub trait SnapshotLocator {
    fn locate(&self) -> Result<PathBuf>;
}

/// One restore to perform
#[derive(Debug, Clone, Copy)]
pub struct RestoreRequest<'a> {
    /// Snapshot ID or project name
    pub snapshot: &'a str,
    pub image: &'a str,
    /// WordPress root of the environment
    pub destination: &'a Path,
}

/// Restores snapshot content from a store
pub trait SnapshotService {
    fn restore(&self, store: &Path, request: &RestoreRequest<'_>) -> Result<()>;
}

/// Restores the snapshot selected during provisioning, if any
pub trait SnapshotRestorer {
    /// `Ok(true)` when a snapshot was restored
    fn restore_if_requested(&self, result: &ProvisioningResult) -> Result<bool>;
}

pub struct Restorer<L, S> {
    locator: L,
    service: S,
    image: String,
}

impl<L: SnapshotLocator, S: SnapshotService> Restorer<L, S> {
    pub fn new(locator: L, service: S, image: impl Into<String>) -> Self {
        Self {
            locator,
            service,
            image: image.into(),
        }
    }
}

impl<L: SnapshotLocator, S: SnapshotService> SnapshotRestorer for Restorer<L, S> {
    fn restore_if_requested(&self, result: &ProvisioningResult) -> Result<bool> {
        let Some(snapshot) = result.snapshot.as_deref() else {
            log::debug!("no snapshot selected, skipping restore");
            return Ok(false);
        };

        let store = self.locator.locate()?;
        log::debug!("using snapshot store {}", store.display());

        self.service.restore(
            &store,
            &RestoreRequest {
                snapshot,
                image: &self.image,
                destination: &result.wordpress.paths.wordpress,
            },
        )?;
        Ok(true)
    }
}
