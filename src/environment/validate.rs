//! Hostname and mount point checks

use std::path::{Component, Path};

use crate::error::{Result, WpenvError};

fn invalid_hostname(hostname: &str, reason: &str) -> WpenvError {
    WpenvError::InvalidHostname {
        hostname: hostname.to_string(),
        reason: reason.to_string(),
    }
}

fn invalid_mount_point(mount_point: &str, reason: &str) -> WpenvError {
    WpenvError::InvalidMountPoint {
        mount_point: mount_point.to_string(),
        reason: reason.to_string(),
    }
}

/// Validate a hostname and return it trimmed and lowercased
///
/// Only letters, digits, `-` and `.` are accepted; labels may not be empty
/// or start or end with `-`.
pub fn hostname(raw: &str) -> Result<String> {
    let host = raw.trim().to_ascii_lowercase();

    if host.is_empty() {
        return Err(invalid_hostname(raw, "must not be empty"));
    }
    if host.contains("://") {
        return Err(invalid_hostname(raw, "must not include a scheme"));
    }
    if host.contains('/') || host.chars().any(char::is_whitespace) {
        return Err(invalid_hostname(raw, "must not contain '/' or spaces"));
    }
    if let Some(c) = host
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
    {
        return Err(invalid_hostname(raw, &format!("unexpected character '{c}'")));
    }
    for label in host.split('.') {
        if label.is_empty() {
            return Err(invalid_hostname(raw, "contains an empty label"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid_hostname(raw, "labels must not start or end with '-'"));
        }
    }

    Ok(host)
}

/// Split a comma separated list of hostnames, validating each
pub fn host_list(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(hostname)
        .collect()
}

/// Validate a mount point and return it with `/` separators and no
/// trailing slash
pub fn mount_point(raw: &str) -> Result<String> {
    let trimmed = raw.trim().replace('\\', "/");
    let trimmed = trimmed.trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(invalid_mount_point(raw, "must not be empty"));
    }

    let mut parts = Vec::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(invalid_mount_point(raw, "must not contain '..'"));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid_mount_point(raw, "must be relative to the WordPress root"));
            }
        }
    }

    if parts.is_empty() {
        return Err(invalid_mount_point(raw, "must name a directory"));
    }
    Ok(parts.join("/"))
}

/// Directory name for an environment, derived from its primary hostname
///
/// Lowercase ASCII letters and digits are kept, every other run of
/// characters becomes a single `-`.
pub fn slug(hostname: &str) -> String {
    let mut slug = String::with_capacity(hostname.len());
    for c in hostname.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
