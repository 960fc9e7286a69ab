//! Test fixtures shared by the unit tests.
//!
//! - [`ScriptedPrompter`] answers interactive questions from a fixed script
//! - [`create_origin_repo`] builds a local repository with two branches to
//!   clone from
//! - [`write_tree`] / [`list_files`] set up and inspect directory trees

#![allow(clippy::expect_used, clippy::panic)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use git2::{Commit, IndexAddOption, Oid, Repository, Signature};
use tempfile::TempDir;

use crate::error::{Result, WpenvError};
use crate::prompt::Prompter;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum Answer {
    /// Reply to `text` or `password`; an empty string takes the default
    Text(String),
    Confirm(bool),
    Select(usize),
    /// Behave like the user pressed ESC
    Cancel,
}

/// Prompter that replays answers in order and records every question
///
/// Panics on a question it has no answer for, which makes an unexpected
/// prompt fail the test loudly.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(message.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Cancel) => Err(WpenvError::Cancelled {
                operation: message.to_string(),
            }),
            Some(answer) => Ok(answer),
            None => panic!("unexpected question: {message}"),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, message: &str, default: Option<&str>) -> Result<String> {
        match self.next(message)? {
            Answer::Text(text) if text.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(text) => Ok(text),
            other => panic!("expected text answer for {message:?}, got {other:?}"),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(yes) => Ok(yes),
            other => panic!("expected confirm answer for {message:?}, got {other:?}"),
        }
    }

    fn password(&self, message: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Text(text) => Ok(text),
            other => panic!("expected password answer for {message:?}, got {other:?}"),
        }
    }

    fn select(&self, message: &str, options: &[String]) -> Result<usize> {
        match self.next(message)? {
            Answer::Select(index) if index < options.len() => Ok(index),
            other => panic!("expected select answer within {options:?}, got {other:?}"),
        }
    }
}

/// Create a temp directory in the system temp location.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::workspace::temp_dir_base()).expect("Failed to create temp directory")
}

/// Write `files` (relative path, content) under `root`
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
    }
}

/// Relative paths of all files under `root`, sorted, `/`-separated
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .expect("walkdir stays under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

fn commit_all(repo: &Repository, refname: &str, message: &str, parents: &[&Commit<'_>]) -> Oid {
    let sig = Signature::now("Test", "test@example.test").expect("Failed to create signature");
    let mut index = repo.index().expect("Failed to open index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("Failed to stage files");
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    repo.commit(Some(refname), &sig, &sig, message, &tree, parents)
        .expect("Failed to commit")
}

/// Create a repository to clone from.
///
/// Branch `stable` holds `style.css`; branch `develop` (HEAD) adds
/// `themes/site/functions.php` on top of it.
#[must_use]
pub fn create_origin_repo() -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let path = temp.path().join("origin");
    let repo = Repository::init(&path).expect("Failed to init git repository");

    write_tree(&path, &[("style.css", "/* Theme Name: Site */\n")]);
    let stable = commit_all(&repo, "refs/heads/stable", "Initial commit", &[]);

    write_tree(&path, &[("themes/site/functions.php", "<?php\n")]);
    let parent = repo.find_commit(stable).expect("Failed to find commit");
    commit_all(&repo, "refs/heads/develop", "Add theme", &[&parent]);
    repo.set_head("refs/heads/develop")
        .expect("Failed to move HEAD");

    (temp, path)
}
