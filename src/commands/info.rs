//! `info`: describe the resolved repository and host.
use super::Context;

/// Log the repository description, identity, URLs and package manager.
pub fn run(ctx: &Context<'_>) {
    let config = ctx.config;
    let metadata = &config.metadata;

    ctx.log.stage("Repository");
    if !config.help_description.is_empty() {
        ctx.log.info(&config.help_description);
    }
    ctx.log.info(&format!("user:        {}", metadata.user));
    ctx.log.info(&format!("repository:  {}", metadata.repo));
    ctx.log.info(&format!("branch:      {}", metadata.branch));
    ctx.log.info(&format!("base url:    {}", metadata.base_url));
    ctx.log.info(&format!("install url: {}", config.install_url));
    ctx.log.info(&format!("tree:        {} paths", metadata.git_paths.len()));

    ctx.log.stage("Host");
    ctx.log.info(&format!("os:          {}", ctx.platform.os));
    ctx.log.info(&format!("home:        {}", ctx.platform.home.display()));
    ctx.log.info(&format!(
        "packages:    {} ({} in catalog)",
        ctx.packages.profile.map_or("none", |p| p.name),
        ctx.packages.catalog.len()
    ));
    if !config.tmp_dir.is_empty() {
        ctx.log.info(&format!("tmp dir:     {}", config.tmp_dir));
    }

    let catalog = &ctx.packages.catalog;
    if catalog.is_empty() {
        return;
    }
    ctx.log.stage("Package categories");
    for category in catalog.categories() {
        let names: Vec<&str> = catalog
            .packages_in(category)
            .map(Iterator::collect)
            .unwrap_or_default();
        ctx.log.info(&format!("{category}: {}", names.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::Fixture;

    #[test]
    fn info_has_no_side_effects() {
        let fx = Fixture::new(
            "help_description = \"my dots\"",
            "[cli]\ngit = { apt = \"git\" }\n",
            &["bashrc"],
        );
        run(&fx.context(false));
        assert!(fx.executor.calls().is_empty());
        assert!(fx.log.task_entries().is_empty());
    }
}
