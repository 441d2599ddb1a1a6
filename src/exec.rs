//! External command execution behind an injectable [`Executor`].
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::ExecError;

/// Result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over process execution so resolver and command logic can be
/// unit-tested without spawning real programs.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `program` with `args` in `dir` and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started or exits non-zero.
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult, ExecError>;

    /// Run `command` through `sh -c` with the terminal attached, so package
    /// managers and installers can prompt (e.g. for a sudo password).
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be started or exits non-zero.
    fn run_shell_interactive(&self, command: &str, dir: Option<&Path>) -> Result<(), ExecError>;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// Production [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

/// Turn captured output into a result, failing on a non-zero exit.
fn checked(output: Output, label: &str) -> Result<ExecResult, ExecError> {
    let result = ExecResult::from(output);
    if !result.success {
        return Err(ExecError::Status {
            command: label.to_string(),
            code: result.code.unwrap_or(-1),
            stderr: result.stderr.trim().to_string(),
        });
    }
    Ok(result)
}

fn shell(command: &str, dir: Option<&Path>) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd
}

impl Executor for SystemExecutor {
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult, ExecError> {
        let label = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| ExecError::Spawn {
                command: label.clone(),
                source,
            })?;
        checked(output, &label)
    }

    fn run_shell_interactive(&self, command: &str, dir: Option<&Path>) -> Result<(), ExecError> {
        let status = shell(command, dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ExecError::Spawn {
                command: command.to_string(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Status {
                command: command.to_string(),
                code: status.code().unwrap_or(-1),
                stderr: String::new(),
            })
        }
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
