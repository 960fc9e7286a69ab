//! `wpenv.json`: the environment definition written at its root

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Domain, ProvisioningResult};
use crate::error::{Result, WpenvError};

/// Name of the manifest file inside an environment directory
pub const MANIFEST_FILE: &str = "wpenv.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentManifest {
    pub name: String,
    pub domain: Domain,
    pub https: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
}

impl From<&ProvisioningResult> for EnvironmentManifest {
    fn from(result: &ProvisioningResult) -> Self {
        Self {
            name: result.name.clone(),
            domain: result.domain.clone(),
            https: result.wordpress.https,
            mount_point: result.mount_point.clone(),
            snapshot: result.snapshot.clone(),
        }
    }
}

impl EnvironmentManifest {
    /// Write the manifest into `root`
    pub fn write(&self, root: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(root.join(MANIFEST_FILE), format!("{json}\n")).map_err(|e| {
            WpenvError::ProvisioningFailed {
                message: format!("cannot write {MANIFEST_FILE} in {}: {e}", root.display()),
            }
        })
    }

    /// Read the manifest from `root`
    #[cfg(test)]
    pub fn read(root: &Path) -> Result<Self> {
        let content = fs::read_to_string(root.join(MANIFEST_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }
}
