//! Top-level subcommand orchestration.
pub mod info;
pub mod installer;
pub mod package;
pub mod sync;
pub mod targets;
pub mod update;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::error::BootstrapError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Logger, TaskStatus};
use crate::packages::PackageManager;
use crate::platform::Platform;
use crate::remote::{HttpRemote, Remote};
use crate::repository::RepositoryMetadata;
use crate::resources::{Applicable, Resource, ResourceChange};

/// Shared state produced by the common command setup sequence.
///
/// Resolves the repository, then loads the remote configuration and the
/// package catalog so that each command does not repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected host platform.
    pub platform: Platform,
    /// Process runner used for git and package commands.
    pub executor: SystemExecutor,
    /// HTTP client for the hosting service.
    pub remote: HttpRemote,
    /// Resolved repository configuration.
    pub config: Config,
    /// Selected package manager and catalog.
    pub packages: PackageManager,
}

impl CommandSetup {
    /// Detect the platform, resolve the repository, and load both manifests.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined, the
    /// repository cannot be resolved, or either manifest fails to load.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let platform = Platform::detect();
        let executor = SystemExecutor;
        let timeout = (global.timeout > 0).then(|| Duration::from_secs(global.timeout));
        let remote = HttpRemote::new(timeout);
        let dir = match &global.repo {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("determining current directory")?,
        };

        log.stage("Resolving repository");
        log.debug(&format!("repository directory: {}", dir.display()));
        let metadata = RepositoryMetadata::resolve(&dir, &executor, &remote)
            .with_context(|| format!("resolving repository in {}", dir.display()))?;
        log.info(&format!(
            "{}/{}@{} ({} paths)",
            metadata.user,
            metadata.repo,
            metadata.branch,
            metadata.git_paths.len()
        ));

        log.stage("Loading configuration");
        let (config, packages) = load_manifests(metadata, &executor, &remote)?;

        log.debug(&format!("{} sync groups", config.sync.len()));
        log.debug(&format!("{} installers", config.installers.len()));
        log.debug(&format!("{} packages", packages.catalog.len()));
        match &packages.profile {
            Some(profile) => log.info(&format!("package manager: {}", profile.name)),
            None => log.warn("no supported package manager found"),
        }

        Ok(Self {
            platform,
            executor,
            remote,
            config,
            packages,
        })
    }

    /// Borrow everything a command handler needs.
    #[must_use]
    pub fn context<'a>(&'a self, log: &'a Logger, dry_run: bool) -> Context<'a> {
        Context {
            config: &self.config,
            packages: &self.packages,
            platform: &self.platform,
            executor: &self.executor,
            remote: &self.remote,
            log,
            dry_run,
        }
    }
}

/// Fetch `config.toml`, then select a package manager and fetch
/// `packages.toml` against the configuration's metadata.
///
/// # Errors
///
/// Returns the first manifest that fails to fetch or decode.
pub fn load_manifests(
    metadata: RepositoryMetadata,
    executor: &dyn Executor,
    remote: &dyn Remote,
) -> Result<(Config, PackageManager), BootstrapError> {
    let config = Config::load(metadata, remote)?;
    let packages = PackageManager::load(&config.metadata, executor, remote)?;
    Ok((config, packages))
}

/// Shared context for command execution.
pub struct Context<'a> {
    /// Resolved repository configuration.
    pub config: &'a Config,
    /// Selected package manager and catalog.
    pub packages: &'a PackageManager,
    /// Detected host platform.
    pub platform: &'a Platform,
    /// Process runner.
    pub executor: &'a dyn Executor,
    /// HTTP client.
    pub remote: &'a dyn Remote,
    /// Logger for output and item recording.
    pub log: &'a Logger,
    /// Report changes without applying them.
    pub dry_run: bool,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &"<Config>")
            .field("packages", &"<PackageManager>")
            .field("platform", &self.platform)
            .field("executor", &self.executor)
            .field("remote", &"<dyn Remote>")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl Context<'_> {
    /// Expand `~` in a configured local path.
    #[must_use]
    pub fn local_path(&self, path: &str) -> PathBuf {
        self.platform.expand_home(path)
    }

    /// Run `item` unless in dry-run mode, recording the outcome under `name`.
    ///
    /// Failures are recorded and logged rather than returned so that the
    /// remaining items still run.
    pub fn run_item(&self, name: &str, item: &dyn Applicable) -> TaskStatus {
        if self.dry_run {
            self.log.dry_run(&format!("would run {}", item.description()));
            self.log.record_task(name, TaskStatus::DryRun, None);
            return TaskStatus::DryRun;
        }
        self.log.debug(&format!("running {}", item.description()));
        match item.apply() {
            Ok(ResourceChange::Applied) => {
                self.log.record_task(name, TaskStatus::Ok, None);
                TaskStatus::Ok
            }
            Ok(ResourceChange::AlreadyCorrect) => {
                self.log.record_task(name, TaskStatus::Unchanged, None);
                TaskStatus::Unchanged
            }
            Ok(ResourceChange::Skipped { reason }) => {
                self.log.record_task(name, TaskStatus::Skipped, Some(&reason));
                TaskStatus::Skipped
            }
            Err(e) => self.fail(name, &format!("{e:#}")),
        }
    }

    /// Check `resource` and apply it when it differs, honouring dry-run.
    pub fn sync_item(&self, name: &str, resource: &dyn Resource) -> TaskStatus {
        match resource.needs_change() {
            Ok(false) => {
                self.log.debug(&format!("{} already up to date", resource.description()));
                self.log.record_task(name, TaskStatus::Unchanged, None);
                TaskStatus::Unchanged
            }
            Ok(true) if self.dry_run => {
                self.log.dry_run(&format!("would write {}", resource.description()));
                self.log.record_task(name, TaskStatus::DryRun, None);
                TaskStatus::DryRun
            }
            Ok(true) => self.run_item(name, resource),
            Err(e) => self.fail(name, &format!("{e:#}")),
        }
    }

    /// Record `name` as failed with `reason`.
    pub fn fail(&self, name: &str, reason: &str) -> TaskStatus {
        self.log.error(&format!("{name}: {reason}"));
        self.log.record_task(name, TaskStatus::Failed, Some(reason));
        TaskStatus::Failed
    }
}

/// Print the summary and bail if any item failed.
///
/// # Errors
///
/// Returns an error if one or more items recorded a failure.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} item(s) failed");
    }
    Ok(())
}
