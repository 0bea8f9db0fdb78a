//! Per-manifest link installation.
use anyhow::Result;
use std::path::Path;

use crate::config::Manifest;
use crate::error::InstallError;
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::paths;
use crate::platform::Platform;
use crate::resources::SymlinkResource;

/// What installing one manifest did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstallStats {
    /// Links created.
    pub links: usize,
    /// Entries with no destination for the current platform.
    pub skipped: usize,
}

impl std::ops::AddAssign for InstallStats {
    fn add_assign(&mut self, rhs: Self) {
        self.links += rhs.links;
        self.skipped += rhs.skipped;
    }
}

/// Applies manifests against a destination root for one platform.
pub struct Installer<'a> {
    platform: &'a Platform,
    dest_root: &'a Path,
    fs: &'a dyn FileSystemOps,
    log: &'a dyn Log,
}

impl std::fmt::Debug for Installer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("platform", &self.platform)
            .field("dest_root", &self.dest_root)
            .field("fs", &self.fs)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> Installer<'a> {
    /// Create an installer linking into `dest_root` (which must be absolute).
    #[must_use]
    pub const fn new(
        platform: &'a Platform,
        dest_root: &'a Path,
        fs: &'a dyn FileSystemOps,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            platform,
            dest_root,
            fs,
            log,
        }
    }

    /// Link every entry of `manifest` that has a destination on this platform.
    ///
    /// All entries' source files are checked before any destination is
    /// touched, including entries that would be skipped here. Links are then
    /// created in entry order and, within an entry, in destination order.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::MissingSource`] if a referenced file does not
    /// exist beside the manifest, or the first filesystem error hit while
    /// replacing a destination. Links created before a filesystem error are
    /// left in place.
    pub fn install(&self, manifest: &Manifest) -> Result<InstallStats> {
        let sources = manifest
            .entries
            .iter()
            .map(|entry| {
                let source = paths::normalize(&manifest.source_path(entry));
                if self.fs.exists(&source) {
                    Ok(source)
                } else {
                    Err(InstallError::MissingSource { path: source })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut stats = InstallStats::default();
        for (entry, source) in manifest.entries.iter().zip(sources) {
            let Some(destination) = self.platform.select(&entry.spec) else {
                self.log.debug(&format!(
                    "{}: no destination for {}",
                    entry.file, self.platform
                ));
                stats.skipped += 1;
                continue;
            };

            for path in destination.paths() {
                let link = SymlinkResource::new(
                    source.clone(),
                    paths::normalize(&self.dest_root.join(path)),
                );
                self.log.debug(&link.description());
                link.apply(self.fs)?;
                stats.links += 1;
            }
        }
        Ok(stats)
    }
}
