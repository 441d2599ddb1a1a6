#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing
)]
//! Integration tests for the `sync` and `package` commands against a
//! temporary home directory.

mod common;

use std::path::Path;

use dotfiles_bootstrap::commands::{self, Context, package::Action};
use dotfiles_bootstrap::config::Config;
use dotfiles_bootstrap::logging::{Logger, TaskStatus};
use dotfiles_bootstrap::packages::PackageManager;
use dotfiles_bootstrap::platform::{Os, Platform};
use dotfiles_bootstrap::repository::RepositoryMetadata;

const CONFIG: &str = r#"
[sync.shell]
Targets = [
  { repo_path = "bashrc", local_path = "~/.bashrc" },
  { repo_path = "config/nvim", local_path = "~/.config/nvim" },
]
"#;

const PACKAGES: &str = r#"
[cli]
ripgrep = { pacman = "ripgrep" }
"#;

/// Everything a [`Context`] borrows from.
struct Harness {
    remote: common::FakeRemote,
    git: common::FakeGit,
    config: Config,
    packages: PackageManager,
    platform: Platform,
    log: Logger,
}

impl Harness {
    fn new(home: &Path) -> Self {
        let remote = common::FakeRemote::new()
            .with_file("config.toml", CONFIG)
            .with_file("packages.toml", PACKAGES)
            .with_file("bashrc", "alias ll='ls -l'\n")
            .with_file("config/nvim/init.lua", "require('plugins')\n")
            .with_file("config/nvim/lua/plugins.lua", "return {}\n");
        let git = common::FakeGit::new().with_program("pacman");
        let metadata = RepositoryMetadata::resolve(Path::new("."), &git, &remote).unwrap();
        let (config, packages) = commands::load_manifests(metadata, &git, &remote).unwrap();
        Self {
            remote,
            git,
            config,
            packages,
            platform: Platform::new(Os::Linux, home),
            log: Logger::new("integration"),
        }
    }

    fn context(&self, dry_run: bool) -> Context<'_> {
        Context {
            config: &self.config,
            packages: &self.packages,
            platform: &self.platform,
            executor: &self.git,
            remote: &self.remote,
            log: &self.log,
            dry_run,
        }
    }

    fn status_of(&self, name: &str) -> Option<TaskStatus> {
        self.log
            .task_entries()
            .into_iter()
            .rev()
            .find(|e| e.name == name)
            .map(|e| e.status)
    }
}

#[test]
fn sync_mirrors_files_and_directories() {
    let home = tempfile::tempdir().unwrap();
    let harness = Harness::new(home.path());
    commands::sync::run(&harness.context(false), &[]).unwrap();

    assert_eq!(
        std::fs::read_to_string(home.path().join(".bashrc")).unwrap(),
        "alias ll='ls -l'\n"
    );
    assert_eq!(
        std::fs::read_to_string(home.path().join(".config/nvim/init.lua")).unwrap(),
        "require('plugins')\n"
    );
    assert!(home.path().join(".config/nvim/lua/plugins.lua").is_file());
    assert_eq!(harness.log.failure_count(), 0);
}

#[test]
fn sync_is_idempotent() {
    let home = tempfile::tempdir().unwrap();
    let harness = Harness::new(home.path());
    commands::sync::run(&harness.context(false), &[]).unwrap();
    commands::sync::run(&harness.context(false), &[]).unwrap();
    assert_eq!(harness.status_of("bashrc"), Some(TaskStatus::Unchanged));
}

#[test]
fn local_edits_are_overwritten() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join(".bashrc"), "local change\n").unwrap();
    let harness = Harness::new(home.path());
    commands::sync::run(&harness.context(false), &["shell".to_string()]).unwrap();
    assert_eq!(
        std::fs::read_to_string(home.path().join(".bashrc")).unwrap(),
        "alias ll='ls -l'\n"
    );
    assert_eq!(harness.status_of("bashrc"), Some(TaskStatus::Ok));
}

#[test]
fn dry_run_sync_leaves_home_untouched() {
    let home = tempfile::tempdir().unwrap();
    let harness = Harness::new(home.path());
    commands::sync::run(&harness.context(true), &[]).unwrap();
    assert!(!home.path().join(".bashrc").exists());
    assert!(!home.path().join(".config").exists());
    assert_eq!(harness.status_of("bashrc"), Some(TaskStatus::DryRun));
}

#[test]
fn package_install_runs_manager_command() {
    let home = tempfile::tempdir().unwrap();
    let harness = Harness::new(home.path());
    commands::package::run(
        &harness.context(false),
        Action::Install,
        &["ripgrep".to_string()],
    )
    .unwrap();
    let commands = harness.git.commands();
    assert_eq!(commands.len(), 1);
    assert!(commands[0].starts_with("pacman"));
    assert!(commands[0].ends_with(" ripgrep"));
}
