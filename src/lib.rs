//! Dotfiles bootstrap engine.
//!
//! Resolves the hosted repository behind a local git checkout, loads its
//! declarative TOML manifests over HTTP, and acts on them: syncing files to
//! their local paths, installing packages with the host's package manager,
//! and running multi-step installers.
//!
//! The public API is organised into layers:
//!
//! - **[`repository`]** and **[`remote`]**: repository identity and the HTTP
//!   client for raw files and tree listings
//! - **[`config`]** and **[`packages`]**: decoded `config.toml` and
//!   `packages.toml` plus package command lookup
//! - **[`resources`]**: idempotent `check + apply` primitives
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod packages;
pub mod platform;
pub mod remote;
pub mod repository;
pub mod resources;
