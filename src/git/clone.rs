//! Branch clone into the staging directory

use std::cell::RefCell;
use std::path::Path;

use git2::{FetchOptions, RemoteCallbacks, build::RepoBuilder};

use super::auth::{CredentialState, setup_auth_callbacks};
use super::error::{interpret_git_error, is_missing_branch};
use super::url::normalize_for_clone;
use crate::error::{self, Result};
use crate::prompt::Prompter;

/// Clone `url` at `branch` into `target`, leaving a full working tree
///
/// `target` must be empty or absent. A cancelled credential prompt aborts
/// the clone with the prompt's own error instead of a generic auth failure.
pub fn clone_branch(
    url: &str,
    branch: &str,
    target: &Path,
    prompter: Option<&dyn Prompter>,
) -> Result<()> {
    let auth = RefCell::new(CredentialState::new(prompter));

    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks, &auth);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let mut builder = RepoBuilder::new();
    builder.branch(branch);
    builder.fetch_options(fetch_options);

    let url_to_clone = normalize_for_clone(url);
    log::debug!("cloning {url_to_clone} ({branch}) into {}", target.display());

    let result = builder.clone(url_to_clone.as_ref(), target);
    drop(builder);

    result.map(drop).map_err(|e| {
        if let Some(failure) = auth.borrow_mut().take_failure() {
            return failure;
        }
        if is_missing_branch(&e, branch) {
            return error::git::branch_not_found(url, branch);
        }
        log::debug!("git2 error: class={:?} code={:?}: {}", e.class(), e.code(), e.message());
        error::git::clone_failed(url, interpret_git_error(&e))
    })
}
