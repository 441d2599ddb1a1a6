//! Installer definitions: named sequences of shell steps.
use std::collections::BTreeMap;

use serde::Deserialize;

/// A group of named shell commands; entries run in key order.
pub type StepMap = BTreeMap<String, String>;

/// An installer declared in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Installer {
    /// Usage hint shown when listing installers.
    #[serde(default)]
    pub help_message: String,
    /// Human-readable description.
    #[serde(default, rename = "Description", alias = "description")]
    pub description: String,
    /// Steps run from the current directory.
    #[serde(default, rename = "Install", alias = "install")]
    pub install: Vec<StepMap>,
    /// Steps run inside the temporary directory, which is removed afterwards.
    #[serde(default)]
    pub tmp_install: Vec<StepMap>,
}

/// A single named shell step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    /// Step name (the map key).
    pub name: &'a str,
    /// Shell command line.
    pub command: &'a str,
}

fn flatten(maps: &[StepMap]) -> Vec<Step<'_>> {
    maps.iter()
        .flat_map(|map| {
            map.iter().map(|(name, command)| Step {
                name: name.as_str(),
                command: command.as_str(),
            })
        })
        .collect()
}

impl Installer {
    /// `install` steps in execution order.
    #[must_use]
    pub fn install_steps(&self) -> Vec<Step<'_>> {
        flatten(&self.install)
    }

    /// `tmp_install` steps in execution order.
    #[must_use]
    pub fn tmp_install_steps(&self) -> Vec<Step<'_>> {
        flatten(&self.tmp_install)
    }
}
