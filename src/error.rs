//! Domain-specific error types for the bootstrap engine.
//!
//! Library modules return typed errors built with [`thiserror`]; command
//! handlers and `main` convert them to [`anyhow::Error`] via `?` and decide
//! at a single boundary to report and exit.
//!
//! # Error hierarchy
//!
//! ```text
//! BootstrapError
//! ├── Repository(RepositoryError): git remote/branch, tree listing
//! ├── Fetch(FetchError)          : HTTP transport, status, body read
//! └── Manifest(ManifestError)    : TOML/JSON decoding
//!
//! ExecError                      : command spawn or exit status
//! ```
//!
//! [`ExecError`] surfaces through [`RepositoryError::Git`] when reading git
//! state, and through `anyhow` context when a shell step fails.

use thiserror::Error;

/// Top-level error type for the bootstrap engine.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Repository identity could not be resolved.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// A remote resource could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A manifest could not be decoded.
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Errors that arise while deriving the repository identity.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The git command used to read local state failed.
    #[error("failed to read git state: {0}")]
    Git(#[source] ExecError),

    /// `remote.origin.url` does not contain a user and repository segment.
    #[error("malformed remote URL '{0}': expected at least <user>/<repo>")]
    MalformedRemote(String),

    /// The current branch name is empty (e.g. an unborn repository).
    #[error("could not determine the current branch")]
    MissingBranch,

    /// The remote tree listing call failed.
    #[error("failed to list remote tree for {user}/{repo}@{branch}: {source}")]
    TreeListing {
        /// Repository owner.
        user: String,
        /// Repository name.
        repo: String,
        /// Branch that was listed.
        branch: String,
        /// Underlying fetch or decode failure.
        #[source]
        source: Box<BootstrapError>,
    },
}

/// Errors that arise from fetching remote content.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be completed (DNS, TLS, connection, timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        /// URL that was requested.
        url: String,
        /// Underlying HTTP client error.
        #[source]
        source: ureq::Error,
    },

    /// The server answered with a non-success status code.
    #[error("GET {url} returned HTTP {status}")]
    Status {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        /// URL that was requested.
        url: String,
        /// Underlying HTTP client error.
        #[source]
        source: ureq::Error,
    },
}

/// Errors that arise from decoding a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest bytes are not valid UTF-8.
    #[error("{name} is not valid UTF-8: {source}")]
    Encoding {
        /// Manifest name (e.g. `config.toml`).
        name: String,
        /// Underlying UTF-8 error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// The manifest is not valid TOML for the expected structure.
    #[error("failed to parse {name}: {source}")]
    Toml {
        /// Manifest name (e.g. `packages.toml`).
        name: String,
        /// Underlying TOML decode error.
        #[source]
        source: toml::de::Error,
    },

    /// A JSON document (tree listing) has an unexpected shape.
    #[error("failed to parse {name}: {source}")]
    Json {
        /// Document name.
        name: String,
        /// Underlying JSON decode error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that arise from running external commands.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The process could not be started.
    #[error("failed to execute: {command}: {source}")]
    Spawn {
        /// Command line that was attempted.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("{command} failed (exit {code}): {stderr}")]
    Status {
        /// Command line that was run.
        command: String,
        /// Exit code, or `-1` when terminated by a signal.
        code: i32,
        /// Trimmed standard error output.
        stderr: String,
    },
}
