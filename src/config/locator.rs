//! Recursive manifest discovery.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use walkdir::WalkDir;

use super::MANIFEST_FILE_NAME;

/// Find every manifest file under `root`, the root itself included.
///
/// Entries are visited depth-first in file-name order, so the result is
/// stable for a given tree. Symlinked directories are descended into, so a
/// shared subtree linked into the source root contributes its manifests.
///
/// # Errors
///
/// Returns an error if any directory in the tree cannot be read, or if a
/// directory symlink loops back to one of its ancestors.
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("scanning {}", root.display()))?;
        if entry.file_name() == MANIFEST_FILE_NAME && entry.path().is_file() {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}
