//! Repository fetching
//!
//! This module handles:
//! - Cloning one branch of a remote repository (HTTPS, SSH, local paths)
//! - Authentication via git's native credential system, with an interactive
//!   fallback
//! - Turning libgit2 failures into user-facing reasons

pub mod auth;
pub mod clone;
pub mod error;
pub mod url;

use crate::error::Result;
use crate::prompt::Prompter;
use crate::workspace::Workspace;

/// Checks out a branch of a remote repository into a workspace
pub trait RepositoryFetcher {
    fn fetch(&self, workspace: &Workspace, url: &str, branch: &str) -> Result<()>;
}

/// libgit2-backed fetcher
pub struct GitFetcher<'p> {
    prompter: Option<&'p dyn Prompter>,
}

impl<'p> GitFetcher<'p> {
    /// Fetcher that asks `prompter` for credentials when git has none
    pub fn new(prompter: &'p dyn Prompter) -> Self {
        Self {
            prompter: Some(prompter),
        }
    }

    /// Fetcher that never prompts
    pub fn non_interactive() -> Self {
        Self { prompter: None }
    }
}

impl RepositoryFetcher for GitFetcher<'_> {
    fn fetch(&self, workspace: &Workspace, url: &str, branch: &str) -> Result<()> {
        url::validate(url)?;
        clone::clone_branch(url, branch, workspace.path(), self.prompter)?;
        log::info!(
            "cloned {} ({branch}) into {}",
            url::repository_name(url),
            workspace.path().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WpenvError;
    use crate::test_fixtures::create_origin_repo;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_populates_workspace() {
        let (_origin_dir, origin) = create_origin_repo();
        let staging = TempDir::new().unwrap();
        let workspace = Workspace::new(staging.path());

        GitFetcher::non_interactive()
            .fetch(&workspace, origin.to_str().unwrap(), "develop")
            .unwrap();

        assert!(staging.path().join("style.css").is_file());
    }

    #[test]
    fn test_fetch_from_path_with_spaces() {
        let (origin_dir, origin) = create_origin_repo();
        let spaced = origin_dir.path().join("my sites");
        std::fs::create_dir(&spaced).unwrap();
        let moved = spaced.join("origin");
        std::fs::rename(&origin, &moved).unwrap();
        let staging = TempDir::new().unwrap();
        let workspace = Workspace::new(staging.path());

        GitFetcher::non_interactive()
            .fetch(&workspace, moved.to_str().unwrap(), "develop")
            .unwrap();

        assert!(staging.path().join("themes/site/functions.php").is_file());
    }

    #[test]
    fn test_fetch_rejects_empty_url() {
        let staging = TempDir::new().unwrap();
        let workspace = Workspace::new(staging.path());

        let err = GitFetcher::non_interactive()
            .fetch(&workspace, "", "master")
            .unwrap_err();

        assert!(matches!(err, WpenvError::InvalidUrl { .. }));
        assert!(workspace.is_empty());
    }
}
