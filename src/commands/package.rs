//! `package install|uninstall`: run catalog-resolved package commands.
use anyhow::Result;

use super::Context;
use crate::packages::PackageManager;
use crate::resources::shell::ShellCommandResource;

/// Direction of a package command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Install the packages.
    Install,
    /// Remove the packages.
    Uninstall,
}

impl Action {
    const fn verb(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
        }
    }

    fn command_for(self, packages: &PackageManager, name: &str) -> Option<String> {
        match self {
            Self::Install => packages.install_cmd(name),
            Self::Uninstall => packages.uninstall_cmd(name),
        }
    }
}

/// Run `action` for every package in `names`, in order.
///
/// # Errors
///
/// Returns an error if any package is unknown, has no command for this
/// host, or its command fails.
pub fn run(ctx: &Context<'_>, action: Action, names: &[String]) -> Result<()> {
    let verb = action.verb();
    ctx.log.stage(&format!("Package {verb}"));
    let manager = ctx.packages.profile.map(|p| p.name);
    if manager.is_none() {
        ctx.log
            .warn("no supported package manager found; only explicit commands can run");
    }

    for name in names {
        if ctx.packages.package_by_name(name).is_none() {
            ctx.fail(name, "not in package catalog");
            continue;
        }
        let Some(command) = action.command_for(ctx.packages, name) else {
            let reason = manager.map_or_else(
                || format!("no {verb} command and no package manager"),
                |m| format!("no {verb} command for {m}"),
            );
            ctx.fail(name, &reason);
            continue;
        };
        let step = ShellCommandResource::new(name, &command, ctx.executor);
        ctx.run_item(name, &step);
    }
    super::finish(ctx.log)
}
