//! Remote configuration manifest (`config.toml`).
pub mod installers;
pub mod sync;
pub mod toml_loader;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{BootstrapError, ManifestError};
use crate::remote::Remote;
use crate::repository::RepositoryMetadata;

pub use installers::Installer;
pub use sync::{Target, TargetGroup};

/// Token in `tmp_dir` replaced by the repository name.
pub const REPO_NAME_PLACEHOLDER: &str = "@repo_name";

/// Manifest file name, relative to the repository root.
pub const CONFIG_FILE: &str = "config.toml";

/// Install script used when `custom_install_url` is not set.
pub const DEFAULT_INSTALL_SCRIPT: &str = "install.sh";

/// On-the-wire shape of `config.toml`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    tmp_dir: String,
    #[serde(default)]
    custom_install_url: String,
    #[serde(default)]
    help_description: String,
    #[serde(default, rename = "Sync", alias = "sync")]
    sync: BTreeMap<String, TargetGroup>,
    #[serde(default, rename = "Installers", alias = "installers")]
    installers: BTreeMap<String, Installer>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scratch directory for `tmp_install` steps, placeholder already substituted.
    pub tmp_dir: String,
    /// URL of the install script; never empty.
    pub install_url: String,
    /// Text describing this dotfiles repository.
    pub help_description: String,
    /// Sync groups keyed by group id.
    pub sync: BTreeMap<String, TargetGroup>,
    /// Installers keyed by name.
    pub installers: BTreeMap<String, Installer>,
    /// Identity of the repository the manifest came from.
    pub metadata: RepositoryMetadata,
}

impl Config {
    /// Fetch `config.toml` from the repository described by `metadata` and
    /// resolve it.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be fetched or decoded.
    pub fn load(metadata: RepositoryMetadata, remote: &dyn Remote) -> Result<Self, BootstrapError> {
        let url = metadata.raw_url(CONFIG_FILE);
        let file: ConfigFile = toml_loader::fetch_manifest(remote, &url, CONFIG_FILE)?;
        Ok(Self::resolve(file, metadata))
    }

    /// Decode manifest bytes and resolve them against `metadata`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid `config.toml`.
    pub fn from_manifest(bytes: &[u8], metadata: RepositoryMetadata) -> Result<Self, ManifestError> {
        let file: ConfigFile = toml_loader::decode(bytes, CONFIG_FILE)?;
        Ok(Self::resolve(file, metadata))
    }

    /// Apply the post-decode transforms: placeholder substitution, then the
    /// default install URL.
    fn resolve(file: ConfigFile, metadata: RepositoryMetadata) -> Self {
        let tmp_dir = file
            .tmp_dir
            .replace(REPO_NAME_PLACEHOLDER, &metadata.repo);
        let install_url = if file.custom_install_url.is_empty() {
            metadata.raw_url(DEFAULT_INSTALL_SCRIPT)
        } else {
            file.custom_install_url
        };
        Self {
            tmp_dir,
            install_url,
            help_description: file.help_description,
            sync: file.sync,
            installers: file.installers,
            metadata,
        }
    }

    /// Flatten every group's targets into `repo_path → local_path`.
    ///
    /// Groups are visited in key order, then targets in declaration order; a
    /// later target with the same `repo_path` replaces an earlier one.
    #[must_use]
    pub fn sync_targets(&self) -> BTreeMap<String, String> {
        self.sync
            .values()
            .flat_map(|group| &group.targets)
            .map(|t| (t.repo_path.clone(), t.local_path.clone()))
            .collect()
    }

    /// Look up an installer by name.
    #[must_use]
    pub fn installer(&self, name: &str) -> Option<&Installer> {
        self.installers.get(name)
    }
}
