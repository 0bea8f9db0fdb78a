//! Domain-specific error types for the installer.
//!
//! Internal modules return typed errors ([`ManifestError`], [`InstallError`])
//! while the command driver and `main` convert them to [`anyhow::Error`] via
//! the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ManifestError  : reading and decoding a single dotinst.json
//! InstallError   : missing roots, missing sources, no home directory
//! ```
//!
//! Filesystem failures during linking are not given their own variants; they
//! carry `anyhow` context naming the path and the operation instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading a manifest file.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {}: {source}", path.display())]
    Read {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON.
    #[error("invalid JSON in manifest {}: {source}", path.display())]
    InvalidJson {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying decoder error.
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an object.
    #[error("manifest {} must be a JSON object", path.display())]
    NotAnObject {
        /// Path of the manifest.
        path: PathBuf,
    },

    /// A file entry maps to something other than a platform table.
    #[error("entry '{file}' in {} must map platform keys to destinations", path.display())]
    InvalidSpec {
        /// Path of the manifest.
        path: PathBuf,
        /// Relative source file name of the offending entry.
        file: String,
    },

    /// A destination value is neither a path nor a list of paths.
    #[error("unknown format for '{file}' [{platform}] in {}", path.display())]
    UnknownFormat {
        /// Path of the manifest.
        path: PathBuf,
        /// Relative source file name of the offending entry.
        file: String,
        /// Platform key whose value has the wrong shape.
        platform: String,
    },
}

/// Errors that abort an install run before or between link operations.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The source or destination root does not exist.
    #[error("directory not found: {}", path.display())]
    MissingRoot {
        /// The missing root path.
        path: PathBuf,
    },

    /// A manifest references a file that does not exist beside it.
    #[error("file not found: {}", path.display())]
    MissingSource {
        /// Absolute path of the missing source file.
        path: PathBuf,
    },

    /// No home directory could be determined for the default destination.
    #[error("cannot determine home directory; pass --dest explicitly")]
    HomeNotFound,
}
