//! Remote URL handling for clones
//!
//! libgit2 does not understand SCP-style SSH remotes and is picky about
//! `file://` URLs, so both are rewritten before cloning.

use std::borrow::Cow;

use crate::error::{Result, WpenvError};

/// Reject an empty URL; anything else is left for git to judge
pub fn validate(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(WpenvError::InvalidUrl {
            url: url.to_string(),
        });
    }
    Ok(())
}

/// Rewrite `url` into a form libgit2 can clone
pub fn normalize_for_clone(url: &str) -> Cow<'_, str> {
    match normalize_ssh_url(url) {
        Cow::Borrowed(unchanged) => normalize_file_url(unchanged),
        Cow::Owned(rewritten) => Cow::Owned(rewritten),
    }
}

/// `git@host:org/repo.git` becomes `ssh://git@host/org/repo.git`
fn normalize_ssh_url(url: &str) -> Cow<'_, str> {
    if url.contains("://") {
        return Cow::Borrowed(url);
    }
    let Some((host, path)) = url.split_once(':') else {
        return Cow::Borrowed(url);
    };
    if !host.contains('@') {
        return Cow::Borrowed(url);
    }

    let path = path.strip_prefix('/').unwrap_or(path);
    Cow::Owned(format!("ssh://{host}/{path}"))
}

/// `file://relative` and backslash paths become `file:///...`
fn normalize_file_url(url: &str) -> Cow<'_, str> {
    let Some(rest) = url.strip_prefix("file://") else {
        return Cow::Borrowed(url);
    };

    if rest.contains('\\') {
        let rest = rest.replace('\\', "/");
        let rest = rest.trim_start_matches('/');
        return Cow::Owned(format!("file:///{rest}"));
    }
    if !rest.is_empty() && !rest.starts_with('/') {
        return Cow::Owned(format!("file:///{rest}"));
    }
    Cow::Borrowed(url)
}

/// Last path segment without `.git`, used for log lines
pub fn repository_name(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last)
}
