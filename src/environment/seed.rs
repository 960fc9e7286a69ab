//! Typed view of the keys a repository config may pre-answer
//!
//! | key               | accepted values              |
//! |-------------------|------------------------------|
//! | `hostname`        | string                       |
//! | `extraHosts`      | string (comma list) or list  |
//! | `mountPoint`      | string                       |
//! | `wordpress.https` | boolean                      |
//! | `snapshot`        | string, `false` or null      |
//!
//! A key with the wrong type fails the run; keys nobody reads are logged and
//! ignored.

use serde_json::Value;

use super::validate;
use crate::config::{ResolvedConfiguration, kind_of};
use crate::error::{self, Result};

const HOSTNAME: &str = "hostname";
const EXTRA_HOSTS: &str = "extraHosts";
const MOUNT_POINT: &str = "mountPoint";
const WORDPRESS: &str = "wordpress";
const HTTPS: &str = "https";
const SNAPSHOT: &str = "snapshot";

/// Snapshot decision taken by the config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotChoice {
    Restore(String),
    Skip,
}

/// Answers supplied by the config; `None` means "ask"
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvironmentSeed {
    pub hostname: Option<String>,
    pub extra_hosts: Option<Vec<String>>,
    pub mount_point: Option<String>,
    pub https: Option<bool>,
    pub snapshot: Option<SnapshotChoice>,
}

impl EnvironmentSeed {
    pub fn from_config(config: Option<&ResolvedConfiguration>) -> Result<Self> {
        let mut seed = Self::default();
        let Some(config) = config else {
            return Ok(seed);
        };

        for (key, value) in config {
            match key.as_str() {
                HOSTNAME => seed.hostname = Some(validate::hostname(expect_str(key, value)?)?),
                EXTRA_HOSTS => seed.extra_hosts = Some(extra_hosts(value)?),
                MOUNT_POINT => {
                    seed.mount_point = Some(validate::mount_point(expect_str(key, value)?)?);
                }
                WORDPRESS => seed.https = wordpress_https(value)?,
                SNAPSHOT => seed.snapshot = Some(snapshot(value)?),
                _ => log::warn!("ignoring unknown config key '{key}'"),
            }
        }

        Ok(seed)
    }
}

fn expect_str<'v>(key: &str, value: &'v Value) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| error::config::invalid(key, format!("expected a string, found {}", kind_of(value))))
}

fn extra_hosts(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(list) => validate::host_list(list),
        Value::Array(items) => items
            .iter()
            .map(|item| validate::hostname(expect_str(EXTRA_HOSTS, item)?))
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(error::config::invalid(
            EXTRA_HOSTS,
            format!("expected a string or a list of strings, found {}", kind_of(other)),
        )),
    }
}

fn wordpress_https(value: &Value) -> Result<Option<bool>> {
    let Value::Object(settings) = value else {
        return Err(error::config::invalid(
            WORDPRESS,
            format!("expected a mapping, found {}", kind_of(value)),
        ));
    };

    let mut https = None;
    for (key, value) in settings {
        if key == HTTPS {
            let flag = value.as_bool().ok_or_else(|| {
                error::config::invalid(
                    "wordpress.https",
                    format!("expected a boolean, found {}", kind_of(value)),
                )
            })?;
            https = Some(flag);
        } else {
            log::warn!("ignoring unknown config key 'wordpress.{key}'");
        }
    }
    Ok(https)
}

fn snapshot(value: &Value) -> Result<SnapshotChoice> {
    match value {
        Value::String(name) if !name.trim().is_empty() => {
            Ok(SnapshotChoice::Restore(name.trim().to_string()))
        }
        Value::String(_) | Value::Bool(false) | Value::Null => Ok(SnapshotChoice::Skip),
        other => Err(error::config::invalid(
            SNAPSHOT,
            format!("expected a snapshot name or false, found {}", kind_of(other)),
        )),
    }
}
