//! Filesystem resources the installer applies.
pub mod helpers;
pub mod symlink;

pub use symlink::SymlinkResource;
