//! Common test utilities for wpenv integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{IndexAddOption, Repository, Signature};
use tempfile::TempDir;

/// Config that answers every environment question, so a clone runs without
/// a terminal
pub const SEEDED_CONFIG: &str = "\
hostname: seeded.test
extraHosts:
  - www.seeded.test
mountPoint: wp-content/themes/seeded
wordpress:
  https: true
snapshot: false
";

/// Scratch space for one test: an origin repository, an environments
/// directory and a private temp directory for staging clones
pub struct TestEnv {
    pub temp: TempDir,
    pub origin: PathBuf,
    pub environments: PathBuf,
    pub tmp: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_origin_dir("origin")
    }

    /// Like [`TestEnv::new`], with the origin repository at `relative`
    pub fn with_origin_dir(relative: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let origin = temp.path().join(relative);
        let environments = temp.path().join("environments");
        let tmp = temp.path().join("tmp");
        std::fs::create_dir_all(&environments).expect("Failed to create environments directory");
        std::fs::create_dir_all(&tmp).expect("Failed to create tmp directory");
        Self {
            temp,
            origin,
            environments,
            tmp,
        }
    }

    /// Create the origin repository with `files` committed on `branch`
    pub fn init_origin(&self, branch: &str, files: &[(&str, &str)]) {
        std::fs::create_dir_all(&self.origin).expect("Failed to create origin directory");
        let repo = Repository::init(&self.origin).expect("Failed to init git repository");
        write_files(&self.origin, files);

        let sig = Signature::now("Test", "test@example.test").expect("Failed to create signature");
        let mut index = repo.index().expect("Failed to open index");
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");
        let refname = format!("refs/heads/{branch}");
        repo.commit(Some(&refname), &sig, &sig, "Initial commit", &tree, &[])
            .expect("Failed to commit");
        repo.set_head(&refname).expect("Failed to move HEAD");
    }

    pub fn origin_url(&self) -> String {
        self.origin.to_string_lossy().into_owned()
    }

    /// `wpenv` with environments and staging redirected into this test's
    /// directory
    pub fn wpenv(&self) -> Command {
        let mut cmd = wpenv_cmd();
        cmd.env("WPENV_ENVIRONMENTS_DIR", &self.environments)
            .env("TMPDIR", &self.tmp)
            .env_remove("RUST_LOG")
            .env_remove("WPENV_SNAPSHOTS_DIR")
            .env_remove("WPENV_SNAPSHOTS_IMAGE");
        cmd
    }

    /// Staging directories left under the private temp directory
    pub fn staging_dirs(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.tmp)
            .expect("Failed to read tmp directory")
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with("wpld-"))
            })
            .collect()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(deprecated)]
pub fn wpenv_cmd() -> Command {
    Command::cargo_bin("wpenv").expect("wpenv binary is built")
}

pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }
}
