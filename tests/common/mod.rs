// Shared helpers for integration tests.
//
// Provides in-memory implementations of the `Executor` and `Remote` seams and
// a fluent builder for a fake hosted repository, so each integration test can
// exercise the public API without network access or a real git checkout.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use dotfiles_bootstrap::error::{BootstrapError, ExecError, FetchError};
use dotfiles_bootstrap::exec::{ExecResult, Executor};
use dotfiles_bootstrap::remote::Remote;
use dotfiles_bootstrap::repository;

pub const USER: &str = "alice";
pub const REPO: &str = "dotfiles";
pub const BRANCH: &str = "main";

/// In-memory hosted repository: a tree listing plus file contents.
#[derive(Debug, Default)]
pub struct FakeRemote {
    paths: Vec<String>,
    files: HashMap<String, Vec<u8>>,
    fetched: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at `path` (and its parent directories to the tree).
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        for (i, _) in path.match_indices('/') {
            let dir = path.get(..i).expect("slice at separator").to_string();
            if !self.paths.contains(&dir) {
                self.paths.push(dir);
            }
        }
        self.paths.push(path.to_string());
        self.files.insert(
            format!("{}{path}", repository::base_url(USER, REPO, BRANCH)),
            contents.as_bytes().to_vec(),
        );
        self
    }

    /// URLs fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("fetch log").clone()
    }
}

impl Remote for FakeRemote {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetched.lock().expect("fetch log").push(url.to_string());
        self.files.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }

    fn list_tree(
        &self,
        _user: &str,
        _repo: &str,
        _branch: &str,
    ) -> Result<Vec<String>, BootstrapError> {
        Ok(self.paths.clone())
    }
}

/// Executor answering the git queries of a checkout of `alice/dotfiles@main`
/// and recording every other command.
#[derive(Debug, Default)]
pub struct FakeGit {
    programs: HashSet<String>,
    commands: Mutex<Vec<String>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `program` as installed.
    pub fn with_program(mut self, program: &str) -> Self {
        self.programs.insert(program.to_string());
        self
    }

    /// Shell commands run so far.
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().expect("command log").clone()
    }
}

impl Executor for FakeGit {
    fn run_in(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult, ExecError> {
        let stdout = match (program, args) {
            ("git", ["config", "--get", "remote.origin.url"]) => {
                format!("git@github.com:{USER}/{REPO}.git\n")
            }
            ("git", ["rev-parse", "--abbrev-ref", "HEAD"]) => format!("{BRANCH}\n"),
            _ => String::new(),
        };
        Ok(ExecResult {
            stdout,
            success: true,
            code: Some(0),
            ..ExecResult::default()
        })
    }

    fn run_shell_interactive(&self, command: &str, _dir: Option<&Path>) -> Result<(), ExecError> {
        self.commands
            .lock()
            .expect("command log")
            .push(command.to_string());
        Ok(())
    }

    fn which(&self, program: &str) -> bool {
        self.programs.contains(program)
    }
}
