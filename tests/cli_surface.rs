#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the command-line surface.

use clap::{CommandFactory, Parser};
use dotfiles_bootstrap::cli::Cli;

/// Snapshot of the subcommand list; update deliberately when adding commands.
#[test]
fn subcommand_names() {
    let names: Vec<String> = Cli::command()
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .filter(|name| name != "help")
        .collect();
    insta::assert_snapshot!("subcommand_names", names.join("\n"));
}

/// Every global flag is accepted after any subcommand.
#[test]
fn global_flags_after_subcommand() {
    for sub in ["sync", "targets", "update", "info", "version"] {
        let cli = Cli::try_parse_from(["dotfiles", sub, "-v", "-d", "--timeout", "1"]);
        assert!(cli.is_ok(), "{sub} rejected global flags");
    }
}
