//! Blocking access to the hosting service: raw file fetches and the
//! recursive tree listing.
use std::time::Duration;

use serde::Deserialize;

use crate::error::{BootstrapError, FetchError, ManifestError, RepositoryError};

/// Base of the raw file content endpoint.
pub const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com";

/// Base of the REST API.
pub const API_HOST: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("dotfiles-bootstrap/", env!("CARGO_PKG_VERSION"));

/// Remote content source.
///
/// Production code uses [`HttpRemote`]; tests substitute an in-memory fake.
#[cfg_attr(test, mockall::automock)]
pub trait Remote {
    /// Fetch `url` and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a body
    /// read failure.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// List every path in the tree of `user/repo` at `branch`, recursively,
    /// in the order returned by the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched or decoded.
    fn list_tree(&self, user: &str, repo: &str, branch: &str) -> Result<Vec<String>, BootstrapError>;
}

/// URL of the recursive tree listing for `user/repo` at `branch`.
#[must_use]
pub fn tree_url(user: &str, repo: &str, branch: &str) -> String {
    format!("{API_HOST}/repos/{user}/{repo}/git/trees/{branch}?recursive=1")
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
}

/// Decode a tree listing response body into its entry paths.
///
/// # Errors
///
/// Returns an error if `body` is not a tree listing document.
pub fn parse_tree(body: &[u8]) -> Result<Vec<String>, ManifestError> {
    let response: TreeResponse =
        serde_json::from_slice(body).map_err(|source| ManifestError::Json {
            name: "tree listing".to_string(),
            source,
        })?;
    if response.truncated {
        tracing::warn!("remote tree listing was truncated; some paths are missing");
    }
    Ok(response.tree.into_iter().map(|entry| entry.path).collect())
}

/// [`Remote`] backed by a [`ureq::Agent`].
#[derive(Clone)]
pub struct HttpRemote {
    agent: ureq::Agent,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for HttpRemote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRemote")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpRemote {
    /// Create a remote whose requests give up after `timeout` (`None` waits
    /// forever).
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();
        Self { agent, timeout }
    }
}

impl Remote for HttpRemote {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("GET {url}");
        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|source| match source {
                ureq::Error::StatusCode(status) => FetchError::Status {
                    url: url.to_string(),
                    status,
                },
                source => FetchError::Transport {
                    url: url.to_string(),
                    source,
                },
            })?;
        response
            .body_mut()
            .read_to_vec()
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source,
            })
    }

    fn list_tree(&self, user: &str, repo: &str, branch: &str) -> Result<Vec<String>, BootstrapError> {
        let wrap = |source: BootstrapError| RepositoryError::TreeListing {
            user: user.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            source: Box::new(source),
        };
        let body = self
            .fetch(&tree_url(user, repo, branch))
            .map_err(|e| wrap(e.into()))?;
        parse_tree(&body).map_err(|e| wrap(e.into()).into())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tree_url_is_recursive() {
        assert_eq!(
            tree_url("alice", "dotfiles", "main"),
            "https://api.github.com/repos/alice/dotfiles/git/trees/main?recursive=1"
        );
    }

    #[test]
    fn parse_tree_preserves_order() {
        let body = br#"{
            "sha": "abc",
            "url": "https://api.github.com/x",
            "tree": [
                {"path": "zshrc", "mode": "100644", "type": "blob", "sha": "1"},
                {"path": "config", "mode": "040000", "type": "tree", "sha": "2"},
                {"path": "config/nvim/init.lua", "mode": "100644", "type": "blob", "sha": "3"}
            ],
            "truncated": false
        }"#;
        let paths = parse_tree(body).unwrap();
        assert_eq!(paths, vec!["zshrc", "config", "config/nvim/init.lua"]);
    }

    #[test]
    fn parse_tree_without_truncated_flag() {
        let paths = parse_tree(br#"{"tree": []}"#).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn parse_tree_rejects_error_document() {
        let err = parse_tree(br#"{"message": "Not Found"}"#).unwrap_err();
        assert!(matches!(err, ManifestError::Json { .. }));
    }

    #[test]
    fn http_remote_debug_hides_agent() {
        let remote = HttpRemote::new(Some(Duration::from_secs(5)));
        let rendered = format!("{remote:?}");
        assert!(rendered.contains("HttpRemote"));
        assert!(rendered.contains("5s"));
    }
}
