use anyhow::Result;
use clap::Parser;

use dotfiles_bootstrap::cli::{self, Command, InstallerCommand, PackageCommand};
use dotfiles_bootstrap::commands::{self, CommandSetup, package::Action};
use dotfiles_bootstrap::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    if matches!(args.command, Command::Version) {
        let version = option_env!("DOTFILES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        println!("dotfiles {version}");
        return Ok(());
    }

    logging::init_subscriber(args.verbose, args.command.name());
    let log = Logger::new(args.command.name());

    let setup = CommandSetup::init(&args.global, &log)?;
    let ctx = setup.context(&log, args.global.dry_run);

    match args.command {
        Command::Sync(opts) => commands::sync::run(&ctx, &opts.groups),
        Command::Targets => {
            commands::targets::run(&ctx);
            Ok(())
        }
        Command::Package(PackageCommand::Install { names }) => {
            commands::package::run(&ctx, Action::Install, &names)
        }
        Command::Package(PackageCommand::Uninstall { names }) => {
            commands::package::run(&ctx, Action::Uninstall, &names)
        }
        Command::Update => commands::update::run(&ctx),
        Command::Installer(InstallerCommand::List) => {
            commands::installer::list(&ctx);
            Ok(())
        }
        Command::Installer(InstallerCommand::Run { name }) => {
            commands::installer::run(&ctx, &name)
        }
        Command::Info => {
            commands::info::run(&ctx);
            Ok(())
        }
        Command::Version => Ok(()),
    }
}
