//! Repository identity: who owns the dotfiles repo, which branch is checked
//! out, and what the remote tree contains.
use std::collections::HashSet;
use std::path::Path;

use crate::error::{BootstrapError, RepositoryError};
use crate::exec::Executor;
use crate::remote::{RAW_CONTENT_HOST, Remote};

/// Identity and remote layout of the dotfiles repository.
///
/// Derived once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    /// Repository owner.
    pub user: String,
    /// Repository name.
    pub repo: String,
    /// Checked-out branch.
    pub branch: String,
    /// Raw content URL prefix, always ending in `/`.
    pub base_url: String,
    /// Every path in the remote tree at the branch tip, in listing order.
    pub git_paths: Vec<String>,
}

/// Raw content URL prefix for `user/repo` at `branch`.
#[must_use]
pub fn base_url(user: &str, repo: &str, branch: &str) -> String {
    format!("{RAW_CONTENT_HOST}/{user}/{repo}/{branch}/")
}

/// Split a git remote URL into `(user, repo)`.
///
/// Accepts `https://host/user/repo(.git)` as well as scp-style
/// `git@host:user/repo(.git)` remotes.
///
/// # Errors
///
/// Returns [`RepositoryError::MalformedRemote`] when fewer than two path
/// segments are present.
pub fn parse_remote_url(url: &str) -> Result<(String, String), RepositoryError> {
    let trimmed = url.trim();
    let segments: Vec<&str> = trimmed
        .split(['/', ':'])
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        [.., user, repo] => {
            let repo = repo.strip_suffix(".git").unwrap_or(*repo);
            if repo.is_empty() {
                return Err(RepositoryError::MalformedRemote(trimmed.to_string()));
            }
            Ok(((*user).to_string(), repo.to_string()))
        }
        _ => Err(RepositoryError::MalformedRemote(trimmed.to_string())),
    }
}

impl RepositoryMetadata {
    /// Build metadata from already-known identity and tree paths.
    #[must_use]
    pub fn new(user: &str, repo: &str, branch: &str, git_paths: Vec<String>) -> Self {
        Self {
            user: user.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            base_url: base_url(user, repo, branch),
            git_paths,
        }
    }

    /// Resolve the repository checked out in `dir`.
    ///
    /// Reads `remote.origin.url` and the current branch with `git`, then
    /// lists the remote tree for that branch.
    ///
    /// # Errors
    ///
    /// Returns an error if either git command fails, the remote URL is
    /// malformed, the branch is empty, or the tree listing fails.
    pub fn resolve(
        dir: &Path,
        executor: &dyn Executor,
        remote: &dyn Remote,
    ) -> Result<Self, BootstrapError> {
        let origin = executor
            .run_in(dir, "git", &["config", "--get", "remote.origin.url"])
            .map_err(RepositoryError::Git)?;
        let (user, repo) = parse_remote_url(&origin.stdout)?;

        let branch = executor
            .run_in(dir, "git", &["rev-parse", "--abbrev-ref", "HEAD"])
            .map_err(RepositoryError::Git)?;
        let branch = branch.stdout.trim();
        if branch.is_empty() {
            return Err(RepositoryError::MissingBranch.into());
        }

        tracing::debug!("resolved repository {user}/{repo}@{branch}");
        let git_paths = remote.list_tree(&user, &repo, branch)?;
        Ok(Self::new(&user, &repo, branch, git_paths))
    }

    /// Raw content URL for a path inside the repository.
    #[must_use]
    pub fn raw_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Files to sync for `repo_path`.
    ///
    /// A path listed in the tree with no children is a single file; a path
    /// with children yields every leaf below it, in listing order. Returns
    /// `None` when the path is not in the tree at all.
    #[must_use]
    pub fn files_for(&self, repo_path: &str) -> Option<Vec<&str>> {
        let repo_path = repo_path.trim_matches('/');
        let directories: HashSet<&str> = self
            .git_paths
            .iter()
            .flat_map(|p| p.match_indices('/').filter_map(move |(i, _)| p.get(..i)))
            .collect();

        if directories.contains(repo_path) {
            let prefix = format!("{repo_path}/");
            let files: Vec<&str> = self
                .git_paths
                .iter()
                .map(String::as_str)
                .filter(|p| p.starts_with(&prefix) && !directories.contains(p))
                .collect();
            return Some(files);
        }

        self.git_paths
            .iter()
            .find(|p| *p == repo_path)
            .map(|p| vec![p.as_str()])
    }
}
