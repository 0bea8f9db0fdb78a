//! Dotfiles symlink installer.
//!
//! Finds every `dotinst.json` manifest under a source tree and links the
//! files it names into a destination tree, choosing each file's destination
//! by the running platform.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: discover and parse manifests
//! - **[`platform`]**: platform identity and destination selection
//! - **[`resources`]**: the symlink primitive and its filesystem helpers
//! - **[`installer`]**: apply one manifest
//! - **[`commands`]**: the install run over a whole source tree
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod installer;
pub mod logging;
pub mod operations;
pub mod paths;
pub mod platform;
pub mod resources;
