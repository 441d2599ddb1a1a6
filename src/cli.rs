use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the dotfiles bootstrap tool.
#[derive(Parser, Debug)]
#[command(
    name = "dotfiles",
    about = "Sync dotfiles and install packages from a hosted git repository",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Local checkout used to resolve the remote (defaults to the current directory)
    #[arg(long, global = true, env = "DOTFILES_REPO")]
    pub repo: Option<std::path::PathBuf>,

    /// HTTP timeout in seconds (0 disables the timeout)
    #[arg(long, global = true, env = "DOTFILES_HTTP_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download configured files from the repository
    Sync(SyncOpts),
    /// List sync groups and targets
    Targets,
    /// Install or remove packages from the catalog
    #[command(subcommand)]
    Package(PackageCommand),
    /// Run the package manager's update command
    Update,
    /// List or run installers
    #[command(subcommand)]
    Installer(InstallerCommand),
    /// Show repository and host information
    Info,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sync(_) => "sync",
            Self::Targets => "targets",
            Self::Package(_) => "package",
            Self::Update => "update",
            Self::Installer(_) => "installer",
            Self::Info => "info",
            Self::Version => "version",
        }
    }
}

/// Options for the `sync` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Groups to sync (all when omitted)
    pub groups: Vec<String>,
}

/// `package` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum PackageCommand {
    /// Install packages
    Install {
        /// Package names
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Uninstall packages
    Uninstall {
        /// Package names
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// `installer` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum InstallerCommand {
    /// List installers
    List,
    /// Run an installer
    Run {
        /// Installer name
        name: String,
    },
}
