//! `update`: run the package manager's system update command.
use anyhow::Result;

use super::Context;
use crate::resources::shell::ShellCommandResource;

/// Run the update command of the selected package manager.
///
/// # Errors
///
/// Returns an error if no package manager was found or the update fails.
pub fn run(ctx: &Context<'_>) -> Result<()> {
    let (Some(profile), Some(command)) = (ctx.packages.profile, ctx.packages.update_cmd()) else {
        anyhow::bail!("no supported package manager found");
    };
    ctx.log.stage(&format!("Updating with {}", profile.name));
    let step = ShellCommandResource::new(profile.name, command, ctx.executor);
    ctx.run_item(profile.name, &step);
    super::finish(ctx.log)
}
