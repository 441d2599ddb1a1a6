use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::{Applicable, ResourceChange};
use crate::exec::Executor;

/// A shell command run with the terminal attached (package commands and
/// installer steps).
#[derive(Debug)]
pub struct ShellCommandResource<'a> {
    /// Label shown in logs and the summary.
    pub name: String,
    /// Command line passed to `sh -c`.
    pub command: String,
    dir: Option<PathBuf>,
    executor: &'a dyn Executor,
}

impl<'a> ShellCommandResource<'a> {
    /// Create a new shell command resource.
    #[must_use]
    pub fn new(name: &str, command: &str, executor: &'a dyn Executor) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            dir: None,
            executor,
        }
    }

    /// Run the command from `dir` instead of the current directory.
    #[must_use]
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }
}

impl Applicable for ShellCommandResource<'_> {
    fn description(&self) -> String {
        format!("{}: {}", self.name, self.command)
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.command.trim().is_empty() {
            return Ok(ResourceChange::Skipped {
                reason: "empty command".to_string(),
            });
        }
        self.executor
            .run_shell_interactive(&self.command, self.dir.as_deref())
            .with_context(|| format!("running {}", self.name))?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::FakeExecutor;

    #[test]
    fn description_shows_name_and_command() {
        let exec = FakeExecutor::new();
        let step = ShellCommandResource::new("fonts", "fc-cache -f", &exec);
        assert_eq!(step.description(), "fonts: fc-cache -f");
    }

    #[test]
    fn apply_runs_command() {
        let exec = FakeExecutor::new();
        let step = ShellCommandResource::new("git", "sudo pacman -S --noconfirm git", &exec);
        assert_eq!(step.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(exec.calls(), vec!["sudo pacman -S --noconfirm git"]);
    }

    #[test]
    fn empty_command_is_skipped_without_running() {
        let exec = FakeExecutor::new();
        let step = ShellCommandResource::new("noop", "  ", &exec);
        assert!(matches!(
            step.apply().unwrap(),
            ResourceChange::Skipped { .. }
        ));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn failure_is_error_with_step_name() {
        let exec = FakeExecutor::new().with_failure("make install", 2);
        let step = ShellCommandResource::new("build", "make install", &exec)
            .in_dir(Path::new("/tmp"));
        let err = step.apply().unwrap_err();
        assert!(format!("{err:#}").contains("running build"));
    }
}
