use std::fmt;
use std::path::{Path, PathBuf};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Host operating system.
    pub os: Os,
    /// Home directory used to expand `~` in local paths.
    pub home: PathBuf,
}

impl Platform {
    /// Detect the current platform.
    ///
    /// Falls back to the current directory when no home directory variable
    /// is set.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            home: Self::detect_home(),
        }
    }

    /// Create a platform with explicit values.
    #[must_use]
    pub fn new(os: Os, home: impl Into<PathBuf>) -> Self {
        Self {
            os,
            home: home.into(),
        }
    }

    /// Whether the host runs macOS.
    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.os == Os::MacOs
    }

    /// Expand a leading `~` in `path` against the home directory.
    ///
    /// Only `~` and `~/…` are expanded; `~user` forms are used verbatim.
    #[must_use]
    pub fn expand_home(&self, path: &str) -> PathBuf {
        if path == "~" {
            return self.home.clone();
        }
        path.strip_prefix("~/")
            .map_or_else(|| PathBuf::from(path), |rest| self.home.join(rest))
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            Os::Linux
        }
    }

    fn detect_home() -> PathBuf {
        let var = if cfg!(target_os = "windows") {
            std::env::var("USERPROFILE").or_else(|_| std::env::var("HOME"))
        } else {
            std::env::var("HOME")
        };
        var.map_or_else(|_| Path::new(".").to_path_buf(), PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_matches_target() {
        let p = Platform::detect();
        assert_eq!(p.is_macos(), cfg!(target_os = "macos"));
    }

    #[test]
    fn platform_new_macos() {
        let p = Platform::new(Os::MacOs, "/Users/alice");
        assert!(p.is_macos());
        assert!(!Platform::new(Os::Linux, "/home/alice").is_macos());
    }

    #[test]
    fn expand_tilde_alone() {
        let p = Platform::new(Os::Linux, "/home/alice");
        assert_eq!(p.expand_home("~"), PathBuf::from("/home/alice"));
    }

    #[test]
    fn expand_tilde_prefix() {
        let p = Platform::new(Os::Linux, "/home/alice");
        assert_eq!(
            p.expand_home("~/.config/nvim"),
            PathBuf::from("/home/alice/.config/nvim")
        );
    }

    #[test]
    fn absolute_and_user_paths_untouched() {
        let p = Platform::new(Os::Linux, "/home/alice");
        assert_eq!(p.expand_home("/etc/hosts"), PathBuf::from("/etc/hosts"));
        assert_eq!(p.expand_home("~bob/x"), PathBuf::from("~bob/x"));
    }

    #[test]
    fn os_display() {
        assert_eq!(Os::Linux.to_string(), "linux");
        assert_eq!(Os::MacOs.to_string(), "macos");
        assert_eq!(Os::Windows.to_string(), "windows");
    }
}
