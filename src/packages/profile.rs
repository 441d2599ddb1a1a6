//! Built-in package manager command table and host probing.
use std::fmt;

use crate::exec::Executor;

/// Package managers the engine knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerKind {
    /// Arch Linux.
    Pacman,
    /// Fedora / RHEL.
    Dnf,
    /// Homebrew.
    Brew,
    /// Debian / Ubuntu.
    Apt,
}

impl ManagerKind {
    /// Probe order; the first manager found on the host wins.
    pub const PROBE_ORDER: [Self; 4] = [Self::Pacman, Self::Dnf, Self::Brew, Self::Apt];

    /// Binary name, also the catalog attribute key for this manager.
    #[must_use]
    pub const fn binary(self) -> &'static str {
        match self {
            Self::Pacman => "pacman",
            Self::Dnf => "dnf",
            Self::Brew => "brew",
            Self::Apt => "apt",
        }
    }

    /// Command templates for this manager.
    #[must_use]
    pub const fn profile(self) -> Profile {
        let (install_cmd, uninstall_cmd, update_cmd) = match self {
            Self::Pacman => ("pacman -S --no-confirm", "pacman -Rs --no-confirm", "pacman -Syu"),
            Self::Dnf => ("dnf install -y", "dnf remove -y", "dnf update"),
            Self::Brew => ("brew install", "brew uninstall", "brew upgrade"),
            Self::Apt => ("apt install -y", "apt remove -y", "apt update"),
        };
        Profile {
            name: self.binary(),
            install_cmd,
            uninstall_cmd,
            update_cmd,
        }
    }
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Command templates of the selected package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Manager name, matched against catalog attribute keys.
    pub name: &'static str,
    /// Install command prefix; the package identifier is appended.
    pub install_cmd: &'static str,
    /// Uninstall command prefix; the package identifier is appended.
    pub uninstall_cmd: &'static str,
    /// Full system update command.
    pub update_cmd: &'static str,
}

/// Select the first manager in [`ManagerKind::PROBE_ORDER`] whose binary is
/// on `PATH`.
#[must_use]
pub fn detect(executor: &dyn Executor) -> Option<Profile> {
    ManagerKind::PROBE_ORDER
        .into_iter()
        .find(|kind| executor.which(kind.binary()))
        .map(ManagerKind::profile)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::FakeExecutor;

    #[test]
    fn pacman_wins_over_apt() {
        let executor = FakeExecutor::new()
            .with_program("apt")
            .with_program("pacman");
        assert_eq!(detect(&executor).unwrap().name, "pacman");
    }

    #[test]
    fn dnf_wins_over_brew() {
        let executor = FakeExecutor::new().with_program("brew").with_program("dnf");
        assert_eq!(detect(&executor).unwrap().name, "dnf");
    }

    #[test]
    fn apt_alone() {
        let executor = FakeExecutor::new().with_program("apt");
        let profile = detect(&executor).unwrap();
        assert_eq!(profile, ManagerKind::Apt.profile());
        assert_eq!(profile.install_cmd, "apt install -y");
        assert_eq!(profile.uninstall_cmd, "apt remove -y");
        assert_eq!(profile.update_cmd, "apt update");
    }

    #[test]
    fn no_manager_found() {
        let executor = FakeExecutor::new().with_program("zypper");
        assert!(detect(&executor).is_none());
    }

    #[test]
    fn built_in_table() {
        let rows: Vec<String> = ManagerKind::PROBE_ORDER
            .iter()
            .map(|kind| {
                let p = kind.profile();
                format!("{} | {} | {} | {}", p.name, p.install_cmd, p.uninstall_cmd, p.update_cmd)
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                "pacman | pacman -S --no-confirm | pacman -Rs --no-confirm | pacman -Syu",
                "dnf | dnf install -y | dnf remove -y | dnf update",
                "brew | brew install | brew uninstall | brew upgrade",
                "apt | apt install -y | apt remove -y | apt update",
            ]
        );
    }

    #[test]
    fn display_is_binary_name() {
        assert_eq!(ManagerKind::Brew.to_string(), "brew");
    }
}
