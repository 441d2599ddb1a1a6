//! A file whose desired content comes from the remote repository.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::remote::Remote;

/// Local copy of one file from the remote tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileResource {
    /// Path inside the repository.
    pub repo_path: String,
    /// Destination on disk.
    pub local_path: PathBuf,
    contents: Vec<u8>,
}

impl RemoteFileResource {
    /// Build a resource from content already in memory.
    #[must_use]
    pub fn new(repo_path: &str, local_path: impl Into<PathBuf>, contents: Vec<u8>) -> Self {
        Self {
            repo_path: repo_path.to_string(),
            local_path: local_path.into(),
            contents,
        }
    }

    /// Download `url` and describe it as the desired content of `local_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails.
    pub fn fetch(
        remote: &dyn Remote,
        url: &str,
        repo_path: &str,
        local_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let contents = remote
            .fetch(url)
            .with_context(|| format!("downloading {repo_path}"))?;
        Ok(Self::new(repo_path, local_path, contents))
    }

    /// Desired file content.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        std::fs::write(path, &self.contents)
            .with_context(|| format!("writing {}", path.display()))
    }
}

impl Applicable for RemoteFileResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.repo_path, self.local_path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Correct => Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Invalid { reason } => Ok(ResourceChange::Skipped { reason }),
            ResourceState::Missing | ResourceState::Incorrect { .. } => {
                self.write(&self.local_path)?;
                Ok(ResourceChange::Applied)
            }
        }
    }
}

impl Resource for RemoteFileResource {
    fn current_state(&self) -> Result<ResourceState> {
        let meta = match std::fs::symlink_metadata(&self.local_path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ResourceState::Missing);
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("inspecting {}", self.local_path.display())));
            }
        };
        if meta.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is a directory", self.local_path.display()),
            });
        }
        let current = std::fs::read(&self.local_path)
            .with_context(|| format!("reading {}", self.local_path.display()))?;
        if current == self.contents {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("{} bytes", current.len()),
            })
        }
    }
}
