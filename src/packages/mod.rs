//! Package manager selection and package command lookup.
pub mod catalog;
pub mod profile;

use crate::config::toml_loader;
use crate::error::BootstrapError;
use crate::exec::Executor;
use crate::remote::Remote;
use crate::repository::RepositoryMetadata;

pub use catalog::{INSTALL_COMMAND_KEY, PackageAttributes, PackageCatalog, UNINSTALL_COMMAND_KEY};
pub use profile::{ManagerKind, Profile};

/// Manifest file name, relative to the repository root.
pub const PACKAGES_FILE: &str = "packages.toml";

/// Selected package manager plus the package catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    /// Selected manager, or `None` when no known manager is installed.
    pub profile: Option<Profile>,
    /// Packages declared by the repository.
    pub catalog: PackageCatalog,
}

impl PackageManager {
    /// Probe the host for a package manager and fetch `packages.toml`.
    ///
    /// A host without any known manager is not an error; lookups will simply
    /// find no manager-specific command.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be fetched or decoded.
    pub fn load(
        metadata: &RepositoryMetadata,
        executor: &dyn Executor,
        remote: &dyn Remote,
    ) -> Result<Self, BootstrapError> {
        let profile = profile::detect(executor);
        match &profile {
            Some(p) => tracing::debug!("package manager: {}", p.name),
            None => tracing::debug!("no supported package manager found"),
        }
        let url = metadata.raw_url(PACKAGES_FILE);
        let catalog = toml_loader::fetch_manifest(remote, &url, PACKAGES_FILE)?;
        Ok(Self { profile, catalog })
    }

    /// Attributes of the package called `name`.
    #[must_use]
    pub fn package_by_name(&self, name: &str) -> Option<&PackageAttributes> {
        self.catalog.package_by_name(name)
    }

    /// Shell command installing `name`.
    ///
    /// An `install_command` attribute is returned verbatim. Otherwise the
    /// manager's install prefix is joined with the package's identifier for
    /// that manager. `None` when the package is unknown or has no entry for
    /// the selected manager.
    #[must_use]
    pub fn install_cmd(&self, name: &str) -> Option<String> {
        self.command_for(name, INSTALL_COMMAND_KEY, |p| p.install_cmd)
    }

    /// Shell command uninstalling `name`; see [`Self::install_cmd`].
    #[must_use]
    pub fn uninstall_cmd(&self, name: &str) -> Option<String> {
        self.command_for(name, UNINSTALL_COMMAND_KEY, |p| p.uninstall_cmd)
    }

    /// The selected manager's system update command.
    #[must_use]
    pub fn update_cmd(&self) -> Option<&'static str> {
        self.profile.map(|p| p.update_cmd)
    }

    fn command_for(
        &self,
        name: &str,
        override_key: &str,
        prefix: fn(&Profile) -> &'static str,
    ) -> Option<String> {
        let package = self.package_by_name(name)?;
        if let Some(command) = package.get(override_key) {
            return Some(command.clone());
        }
        let profile = self.profile.as_ref()?;
        package
            .get(profile.name)
            .map(|identifier| format!("{} {identifier}", prefix(profile)))
    }
}
