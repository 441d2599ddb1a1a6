//! `installer list|run`: named multi-step install recipes.
use std::path::Path;

use anyhow::{Context as _, Result};

use super::Context;
use crate::config::installers::Step;
use crate::logging::TaskStatus;
use crate::resources::shell::ShellCommandResource;

/// Log every installer with its description and help message.
pub fn list(ctx: &Context<'_>) {
    ctx.log.stage("Installers");
    if ctx.config.installers.is_empty() {
        ctx.log.info("no installers defined");
        return;
    }
    for (name, installer) in &ctx.config.installers {
        if installer.description.is_empty() {
            ctx.log.info(name);
        } else {
            ctx.log.info(&format!("{name}: {}", installer.description));
        }
        if !installer.help_message.is_empty() {
            ctx.log.info(&format!("    {}", installer.help_message));
        }
    }
}

/// Run installer `name`: its `Install` steps, then its `tmp_install` steps
/// inside the scratch directory. The first failing step stops the installer.
///
/// # Errors
///
/// Returns an error if the installer does not exist or any step or the
/// scratch directory failed.
pub fn run(ctx: &Context<'_>, name: &str) -> Result<()> {
    let Some(installer) = ctx.config.installer(name) else {
        let known: Vec<&str> = ctx.config.installers.keys().map(String::as_str).collect();
        anyhow::bail!("unknown installer '{name}' (known: {})", known.join(", "));
    };

    ctx.log.stage(&format!("Installing {name}"));
    if !installer.help_message.is_empty() {
        ctx.log.info(&installer.help_message);
    }

    if run_steps(ctx, name, &installer.install_steps(), None) {
        let tmp_steps = installer.tmp_install_steps();
        if !tmp_steps.is_empty() {
            run_in_tmp_dir(ctx, name, &tmp_steps);
        }
    }
    super::finish(ctx.log)
}

/// Run `steps` in order; `false` as soon as one fails.
fn run_steps(ctx: &Context<'_>, installer: &str, steps: &[Step<'_>], dir: Option<&Path>) -> bool {
    for step in steps {
        let label = format!("{installer}: {}", step.name);
        let mut resource = ShellCommandResource::new(&label, step.command, ctx.executor);
        if let Some(dir) = dir {
            resource = resource.in_dir(dir);
        }
        if ctx.run_item(&label, &resource) == TaskStatus::Failed {
            ctx.log.warn(&format!("{installer} aborted at step '{}'", step.name));
            return false;
        }
    }
    true
}

/// Run `steps` inside `tmp_dir`, creating it first and removing it afterwards
/// if it did not exist before. Problems with the directory are recorded as
/// failed items so the summary still covers the steps that already ran.
fn run_in_tmp_dir(ctx: &Context<'_>, installer: &str, steps: &[Step<'_>]) {
    let label = format!("{installer}: scratch directory");
    if ctx.config.tmp_dir.is_empty() {
        ctx.fail(&label, "tmp_install steps need tmp_dir to be set");
        return;
    }
    let dir = ctx.local_path(&ctx.config.tmp_dir);
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would use scratch directory {}", dir.display()));
        run_steps(ctx, installer, steps, Some(&dir));
        return;
    }

    let created = !dir.exists();
    if let Err(e) = std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))
    {
        ctx.fail(&label, &format!("{e:#}"));
        return;
    }
    ctx.log.debug(&format!("scratch directory: {}", dir.display()));

    run_steps(ctx, installer, steps, Some(&dir));

    if created
        && let Err(e) = std::fs::remove_dir_all(&dir)
            .with_context(|| format!("removing {}", dir.display()))
    {
        ctx.fail(&label, &format!("{e:#}"));
    }
}
