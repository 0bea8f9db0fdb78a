//! Symlink resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::helpers::fs::{ensure_parent_dir, remove_existing};
use crate::operations::FileSystemOps;

/// A link to create: `destination` will point at `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// Absolute, normalized path where the symlink will be created.
    pub destination: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self { source, destination }
    }

    /// `destination --> source`, as printed in verbose mode.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} --> {}", self.destination.display(), self.source.display())
    }

    /// Replace whatever is at `destination` with a link to `source`.
    ///
    /// Missing parent directories are created. An existing file, symlink or
    /// directory (with all its contents) is deleted first. Between removal
    /// and creation the destination briefly does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory cannot be created, the existing
    /// entry cannot be removed, or the link cannot be created.
    pub fn apply(&self, fs: &dyn FileSystemOps) -> Result<()> {
        ensure_parent_dir(fs, &self.destination)?;
        remove_existing(fs, &self.destination)?;
        fs.symlink(&self.source, &self.destination).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                self.destination.display(),
                self.source.display()
            )
        })?;
        Ok(())
    }
}
