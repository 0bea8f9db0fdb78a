//! `dotinst.json` manifest loading.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ManifestError;

/// Where a source file should be linked on one platform.
///
/// Either a plain path or a list of paths; any other JSON shape fails to
/// deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Destination {
    /// `"<path>"`: a single link.
    Single(String),
    /// `["<path>", ...]`: one link per path, in order.
    Multiple(Vec<String>),
}

impl Destination {
    /// All destination paths, in declaration order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        match self {
            Self::Single(path) => std::slice::from_ref(path),
            Self::Multiple(paths) => paths,
        }
    }
}

/// Platform key to destination table for one source file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSpec {
    entries: Vec<(String, Destination)>,
}

impl PlatformSpec {
    /// Destination registered under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Destination> {
        self.entries
            .iter()
            .find_map(|(k, dest)| (k == key).then_some(dest))
    }

    /// Platform keys, in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, Destination)> for PlatformSpec {
    fn from_iter<I: IntoIterator<Item = (String, Destination)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One `"file": { ... }` entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Source file name, relative to the manifest's directory.
    pub file: String,
    /// Per-platform destinations for `file`.
    pub spec: PlatformSpec,
}

/// A parsed manifest together with the directory it lives in.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Path of the manifest file itself.
    pub path: PathBuf,
    /// Directory containing the manifest; entry file names resolve against it.
    pub base: PathBuf,
    /// Entries in file order.
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Absolute path of an entry's source file.
    #[must_use]
    pub fn source_path(&self, entry: &ManifestEntry) -> PathBuf {
        self.base.join(&entry.file)
    }
}

/// Read and parse the manifest at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, or any entry
/// has a shape other than `{ "<platform>": "<path>" | ["<path>", ...] }`.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &content)
}

/// Parse manifest `content` as if it had been read from `path`.
///
/// # Errors
///
/// See [`load`].
pub fn parse(path: &Path, content: &str) -> Result<Manifest, ManifestError> {
    let value: Value = serde_json::from_str(content).map_err(|source| ManifestError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(files) = value else {
        return Err(ManifestError::NotAnObject {
            path: path.to_path_buf(),
        });
    };

    let entries = files
        .into_iter()
        .map(|(file, spec)| parse_entry(path, file, spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Manifest {
        path: path.to_path_buf(),
        base: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        entries,
    })
}

fn parse_entry(path: &Path, file: String, spec: Value) -> Result<ManifestEntry, ManifestError> {
    let Value::Object(platforms) = spec else {
        return Err(ManifestError::InvalidSpec {
            path: path.to_path_buf(),
            file,
        });
    };
    let spec = parse_spec(path, &file, platforms)?;
    Ok(ManifestEntry { file, spec })
}

fn parse_spec(
    path: &Path,
    file: &str,
    platforms: Map<String, Value>,
) -> Result<PlatformSpec, ManifestError> {
    platforms
        .into_iter()
        .map(|(platform, value)| match Destination::deserialize(value) {
            Ok(dest) => Ok((platform, dest)),
            Err(_) => Err(ManifestError::UnknownFormat {
                path: path.to_path_buf(),
                file: file.to_string(),
                platform,
            }),
        })
        .collect()
}
