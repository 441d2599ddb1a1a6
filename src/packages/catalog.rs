//! Package catalog (`packages.toml`): category → package → attribute.
use std::collections::BTreeMap;

use serde::Deserialize;

/// Attribute key that overrides the derived install command.
pub const INSTALL_COMMAND_KEY: &str = "install_command";

/// Attribute key that overrides the derived uninstall command.
pub const UNINSTALL_COMMAND_KEY: &str = "uninstall_command";

/// Attributes of one package: manager identifiers and command overrides.
pub type PackageAttributes = BTreeMap<String, String>;

/// Three-level package table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PackageCatalog(BTreeMap<String, BTreeMap<String, PackageAttributes>>);

impl PackageCatalog {
    /// Find a package by exact (case-sensitive) name.
    ///
    /// Categories are scanned in key order; the first match wins.
    #[must_use]
    pub fn package_by_name(&self, name: &str) -> Option<&PackageAttributes> {
        self.0.values().find_map(|packages| packages.get(name))
    }

    /// Category names in key order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Package names of `category`, if it exists.
    pub fn packages_in(&self, category: &str) -> Option<impl Iterator<Item = &str>> {
        self.0
            .get(category)
            .map(|packages| packages.keys().map(String::as_str))
    }

    /// Total number of packages across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    /// Whether the catalog declares no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> PackageCatalog {
        toml::from_str(
            r#"
[cli.ripgrep]
pacman = "ripgrep"
apt = "ripgrep"

[cli.fd]
apt = "fd-find"
brew = "fd"

[editors.neovim]
install_command = "curl -L nvim.sh | sh"
apt = "neovim"
"#,
        )
        .unwrap()
    }

    #[test]
    fn finds_package_in_any_category() {
        let catalog = catalog();
        assert_eq!(
            catalog
                .package_by_name("fd")
                .and_then(|p| p.get("apt"))
                .map(String::as_str),
            Some("fd-find")
        );
        assert!(catalog.package_by_name("neovim").is_some());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(catalog().package_by_name("Ripgrep").is_none());
    }

    #[test]
    fn unknown_package_is_none() {
        assert!(catalog().package_by_name("emacs").is_none());
        assert!(PackageCatalog::default().package_by_name("fd").is_none());
    }

    #[test]
    fn categories_and_counts() {
        let catalog = catalog();
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["cli", "editors"]);
        assert_eq!(
            catalog.packages_in("cli").unwrap().collect::<Vec<_>>(),
            vec!["fd", "ripgrep"]
        );
        assert!(catalog.packages_in("games").is_none());
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
    }
}
