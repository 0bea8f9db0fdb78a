//! The install command: discover manifests under the source root and link
//! each one into the destination root.
use anyhow::{Context as _, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{self, manifest};
use crate::error::InstallError;
use crate::installer::{InstallStats, Installer};
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::paths;
use crate::platform::Platform;

/// Resolved, absolute roots for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Tree searched for manifests.
    pub source: PathBuf,
    /// Root that manifest destinations are relative to.
    pub dest: PathBuf,
}

impl InstallOptions {
    /// Fill in defaults (current directory, home directory) and make both
    /// roots absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read, or if no
    /// `--dest` was given and the home directory is unknown.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("reading current directory")?;
        let dest = match &cli.dest {
            Some(dest) => dest.clone(),
            None => home_dir()?,
        };
        Ok(Self::resolve(
            &cwd,
            cli.source.as_deref().unwrap_or(&cwd),
            &dest,
        ))
    }

    /// Resolve `source` and `dest` against `cwd`.
    #[must_use]
    pub fn resolve(cwd: &Path, source: &Path, dest: &Path) -> Self {
        Self {
            source: paths::absolute_from(cwd, source),
            dest: paths::absolute_from(cwd, dest),
        }
    }
}

/// Totals for a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Manifests found and applied.
    pub manifests: usize,
    /// Links and skips across all manifests.
    pub stats: InstallStats,
}

/// Run the installer: validate roots, then apply every manifest under
/// `opts.source` in discovery order.
///
/// Both roots must be directories; a file passed as either one is reported
/// as a missing root.
///
/// # Errors
///
/// Returns the first error encountered: a missing root, a malformed
/// manifest, a missing source file, or a filesystem failure. Manifests
/// applied before the error keep their links.
pub fn run(
    opts: &InstallOptions,
    platform: &Platform,
    fs: &dyn FileSystemOps,
    log: &dyn Log,
) -> Result<RunSummary> {
    log.stage("dot installer");
    log.info(&field("Source", opts.source.display()));
    log.info(&field("Destination", opts.dest.display()));
    let version = option_env!("DOTINST_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.debug(&field("Version", version));
    log.debug(&field("Platform", platform));

    for root in [&opts.source, &opts.dest] {
        if !fs.is_dir(root) {
            return Err(InstallError::MissingRoot { path: root.clone() }.into());
        }
    }

    let installer = Installer::new(platform, &opts.dest, fs, log);
    let mut summary = RunSummary::default();
    for path in config::find_manifests(&opts.source)? {
        log.debug(&format!("manifest: {}", path.display()));
        let manifest = manifest::load(&path)?;
        summary.stats += installer
            .install(&manifest)
            .with_context(|| format!("installing {}", path.display()))?;
        summary.manifests += 1;
    }

    log.info(&format!(
        "{} manifests, {} links, {} skipped",
        summary.manifests, summary.stats.links, summary.stats.skipped
    ));
    Ok(summary)
}

/// Home directory of the invoking user.
///
/// # Errors
///
/// Returns [`InstallError::HomeNotFound`] if neither `HOME` (nor
/// `USERPROFILE` on Windows) is set.
pub fn home_dir() -> Result<PathBuf, InstallError> {
    home_dir_from(cfg!(target_os = "windows"), |key| std::env::var_os(key))
}

/// Home directory lookup over an arbitrary environment. Empty values count
/// as unset.
fn home_dir_from(
    windows: bool,
    var: impl Fn(&str) -> Option<OsString>,
) -> Result<PathBuf, InstallError> {
    let set = |key: &str| var(key).filter(|v| !v.is_empty());
    let home = if windows {
        set("USERPROFILE").or_else(|| set("HOME"))
    } else {
        set("HOME")
    };
    home.map(PathBuf::from).ok_or(InstallError::HomeNotFound)
}

/// Banner line with the key padded to a fixed column.
fn field(key: &str, value: impl std::fmt::Display) -> String {
    format!("{:<20} {value}", format!("{key}:"))
}
