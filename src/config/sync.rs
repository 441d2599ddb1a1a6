//! Sync groups: remote repository paths mapped onto local paths.
use serde::Deserialize;

/// A named group of sync targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetGroup {
    /// Display name of the group.
    #[serde(default, rename = "Name", alias = "name")]
    pub name: String,
    /// Only sync this group on macOS hosts.
    #[serde(default)]
    pub macos_only: bool,
    /// Targets in declaration order.
    #[serde(default, rename = "Targets", alias = "targets")]
    pub targets: Vec<Target>,
}

/// One file or directory mapping from the remote tree to the local machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Target {
    /// Human-readable description.
    #[serde(default, rename = "Description", alias = "description")]
    pub description: String,
    /// Path inside the repository.
    #[serde(default)]
    pub repo_path: String,
    /// Destination on the local filesystem (`~` expands to the home directory).
    #[serde(default)]
    pub local_path: String,
}

impl TargetGroup {
    /// Whether this group applies on a host that is (or is not) macOS.
    #[must_use]
    pub const fn applies_to(&self, is_macos: bool) -> bool {
        !self.macos_only || is_macos
    }
}
