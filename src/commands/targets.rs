//! `targets`: list sync groups and their path mappings.
use super::Context;

/// Log every sync group with its targets.
pub fn run(ctx: &Context<'_>) {
    if ctx.config.sync.is_empty() {
        ctx.log.info("no sync targets defined");
        return;
    }
    let is_macos = ctx.platform.is_macos();
    for (key, group) in &ctx.config.sync {
        let title = if group.name.is_empty() { key } else { &group.name };
        let marker = match (group.macos_only, group.applies_to(is_macos)) {
            (true, true) => " [macOS only]",
            (true, false) => " [macOS only, skipped on this host]",
            _ => "",
        };
        ctx.log.stage(&format!("{title}{marker}"));
        for target in &group.targets {
            let line = format!("{} -> {}", target.repo_path, target.local_path);
            if target.description.is_empty() {
                ctx.log.info(&line);
            } else {
                ctx.log.info(&format!("{line}  ({})", target.description));
            }
        }
    }
    ctx.log.debug(&format!(
        "{} distinct repository paths",
        ctx.config.sync_targets().len()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::Fixture;

    #[test]
    fn listing_touches_nothing() {
        let fx = Fixture::new(
            r#"
[sync.shell]
Targets = [{ repo_path = "bashrc", local_path = "~/.bashrc" }]
"#,
            "",
            &["bashrc"],
        );
        run(&fx.context(false));
        assert!(fx.executor.calls().is_empty());
        assert!(fx.log.task_entries().is_empty());
    }
}
