//! File-system resource helpers.
use anyhow::{Context as _, Result, bail};
use std::path::Path;

use crate::operations::{EntryKind, FileSystemOps};

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(fs: &dyn FileSystemOps, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs.create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove whatever occupies `path`: files and symlinks (dangling ones
/// included) are unlinked, directories are removed with their contents.
/// Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the entry cannot be inspected or removed, or if it is
/// neither a file, a symlink, nor a directory.
pub fn remove_existing(fs: &dyn FileSystemOps, path: &Path) -> Result<()> {
    let kind = fs
        .entry_kind(path)
        .with_context(|| format!("reading metadata: {}", path.display()))?;
    match kind {
        None => {}
        Some(EntryKind::File | EntryKind::Symlink) => fs
            .remove_file(path)
            .with_context(|| format!("remove existing: {}", path.display()))?,
        Some(EntryKind::Dir) => fs
            .remove_dir_all(path)
            .with_context(|| format!("remove existing directory: {}", path.display()))?,
        Some(EntryKind::Other) => bail!(
            "cannot replace {}: not a file, symlink or directory",
            path.display()
        ),
    }
    Ok(())
}
