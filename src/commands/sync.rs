//! `sync`: download configured repository files to their local paths.
use std::path::PathBuf;

use anyhow::Result;

use super::Context;
use crate::config::sync::{Target, TargetGroup};
use crate::logging::TaskStatus;
use crate::resources::remote_file::RemoteFileResource;

/// Run the sync command for `groups` (every group when empty).
///
/// # Errors
///
/// Returns an error if a named group does not exist or any file failed.
pub fn run(ctx: &Context<'_>, groups: &[String]) -> Result<()> {
    for (key, group) in select_groups(ctx, groups)? {
        ctx.log.stage(&format!("Syncing {}", display_name(key, group)));
        if !group.applies_to(ctx.platform.is_macos()) {
            ctx.log.info("skipped: macOS only");
            ctx.log
                .record_task(key, TaskStatus::Skipped, Some("macOS only"));
            continue;
        }
        for target in &group.targets {
            sync_target(ctx, key, target);
        }
    }
    super::finish(ctx.log)
}

fn display_name<'a>(key: &'a str, group: &'a TargetGroup) -> &'a str {
    if group.name.is_empty() { key } else { &group.name }
}

/// Groups to sync, in table order. A requested name matches either the table
/// key or the group's `Name`.
fn select_groups<'c>(
    ctx: &Context<'c>,
    requested: &[String],
) -> Result<Vec<(&'c str, &'c TargetGroup)>> {
    let all = ctx.config.sync.iter().map(|(k, g)| (k.as_str(), g));
    if requested.is_empty() {
        return Ok(all.collect());
    }
    if let Some(unknown) = requested
        .iter()
        .find(|r| !ctx.config.sync.iter().any(|(k, g)| k == *r || g.name == **r))
    {
        let known: Vec<&str> = ctx.config.sync.keys().map(String::as_str).collect();
        anyhow::bail!("unknown sync group '{unknown}' (known: {})", known.join(", "));
    }
    Ok(all
        .filter(|(k, g)| requested.iter().any(|r| r == k || *r == g.name))
        .collect())
}

/// Destination of `file` for a target rooted at `local_root`.
///
/// A single-file target writes to `local_root` itself; files below a
/// directory target keep their path relative to `repo_path`.
fn destination(repo_path: &str, file: &str, local_root: PathBuf) -> PathBuf {
    let prefix = format!("{}/", repo_path.trim_matches('/'));
    match file.strip_prefix(&prefix) {
        Some(relative) => local_root.join(relative),
        None => local_root,
    }
}

fn sync_target(ctx: &Context<'_>, group: &str, target: &Target) {
    let metadata = &ctx.config.metadata;
    if target.repo_path.is_empty() || target.local_path.is_empty() {
        let label = [target.repo_path.as_str(), target.description.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .map_or_else(|| format!("{group}: unnamed target"), ToString::to_string);
        let missing = if target.repo_path.is_empty() { "repo_path" } else { "local_path" };
        ctx.fail(&label, &format!("target has no {missing}"));
        return;
    }
    let Some(files) = metadata.files_for(&target.repo_path) else {
        ctx.fail(&target.repo_path, "not found in repository tree");
        return;
    };
    if files.is_empty() {
        ctx.log
            .record_task(&target.repo_path, TaskStatus::Skipped, Some("no files"));
        return;
    }
    if !target.description.is_empty() {
        ctx.log.debug(&target.description);
    }

    let local_root = ctx.local_path(&target.local_path);
    for file in files {
        let dest = destination(&target.repo_path, file, local_root.clone());
        match RemoteFileResource::fetch(ctx.remote, &metadata.raw_url(file), file, dest) {
            Ok(resource) => {
                ctx.sync_item(file, &resource);
            }
            Err(e) => {
                ctx.fail(file, &format!("{e:#}"));
            }
        }
    }
}
