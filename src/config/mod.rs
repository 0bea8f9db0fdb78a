//! Manifest discovery and parsing.
pub mod locator;
pub mod manifest;

/// File name a manifest must have, exactly, to be discovered.
pub const MANIFEST_FILE_NAME: &str = "dotinst.json";

pub use locator::find_manifests;
pub use manifest::{Destination, Manifest, ManifestEntry, PlatformSpec};
