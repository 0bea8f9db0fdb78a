//! Running-platform identity and destination selection.
use std::fmt;

use crate::config::manifest::{Destination, PlatformSpec};

/// Identifier of the only platform that is not POSIX-family.
pub const WINDOWS: &str = "win32";

/// Wildcard key matching every platform except [`WINDOWS`].
pub const POSIX_KEY: &str = "posix";

/// Wildcard key matching every platform, lowest precedence.
pub const ANY_KEY: &str = "any";

/// Platform information for the current system.
///
/// Passed explicitly to everything that resolves destinations, so runs can be
/// simulated for another platform in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    id: String,
}

impl Platform {
    /// Create a platform from an explicit identifier such as `"linux"` or `"win32"`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Detect the current platform from the compile target.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(Self::detect_id())
    }

    /// The platform identifier compared against manifest keys.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Everything except [`WINDOWS`] counts as POSIX.
    #[must_use]
    pub fn is_posix(&self) -> bool {
        self.id != WINDOWS
    }

    /// Pick the destination that applies to this platform.
    ///
    /// Precedence is an exact identifier match, then `"posix"` (POSIX
    /// platforms only), then `"any"`. Returns `None` when nothing applies;
    /// that entry is simply not installed here.
    #[must_use]
    pub fn select<'a>(&self, spec: &'a PlatformSpec) -> Option<&'a Destination> {
        spec.get(&self.id)
            .or_else(|| {
                if self.is_posix() {
                    spec.get(POSIX_KEY)
                } else {
                    None
                }
            })
            .or_else(|| spec.get(ANY_KEY))
    }

    const fn detect_id() -> &'static str {
        if cfg!(target_os = "windows") {
            WINDOWS
        } else if cfg!(target_os = "linux") || cfg!(target_os = "android") {
            "linux"
        } else if cfg!(target_os = "macos") {
            "darwin"
        } else if cfg!(target_os = "freebsd") {
            "freebsd"
        } else if cfg!(target_os = "openbsd") {
            "openbsd"
        } else if cfg!(target_os = "netbsd") {
            "netbsd"
        } else if cfg!(target_os = "dragonfly") {
            "dragonfly"
        } else if cfg!(any(target_os = "illumos", target_os = "solaris")) {
            "sunos"
        } else if cfg!(target_os = "aix") {
            "aix"
        } else if cfg!(target_os = "cygwin") {
            "cygwin"
        } else {
            std::env::consts::OS
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
