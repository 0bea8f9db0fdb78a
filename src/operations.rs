//! Filesystem operation abstractions for dependency injection.
//!
//! Everything the installer does to the filesystem goes through
//! [`FileSystemOps`], so link replacement can be unit-tested without touching
//! a real disk. Production code uses [`SystemFileSystemOps`]; tests use
//! `MockFileSystemOps`.

use std::io;
use std::path::Path;

/// Kind of entry found at a path, without following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Symbolic link, whether or not its target exists.
    Symlink,
    /// Real directory.
    Dir,
    /// Anything else (socket, FIFO, device).
    Other,
}

/// Abstraction over the filesystem calls used by the installer.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists, following symbolic links.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory, following symbolic links.
    fn is_dir(&self, path: &Path) -> bool;

    /// Kind of the entry at `path` without following links, or `None` if
    /// nothing is there.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be read for a reason other
    /// than the path being absent.
    fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>>;

    /// Create `path` and all missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file or symbolic link.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything below it.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a symbolic link at `link` pointing to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created (including when
    /// something already exists at `link`).
    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let file_type = meta.file_type();
        Ok(Some(if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        // Directory symlinks and junctions on Windows carry the directory
        // attribute and must go through `remove_dir`.
        #[cfg(windows)]
        {
            use std::os::windows::fs::MetadataExt;
            let meta = std::fs::symlink_metadata(path)?;
            if meta.file_attributes() & 0x10 != 0 {
                return std::fs::remove_dir(path);
            }
        }
        std::fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        create_symlink(target, link)
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Windows needs to know up front whether the link points at a directory.
#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}

/// In-memory [`FileSystemOps`] for unit tests.
///
/// Pre-populate files, directories and links with the builder methods, run
/// the code under test, then inspect the resulting tree with
/// [`kind`](Self::kind) and [`link_target`](Self::link_target).
///
/// ```ignore
/// let fs = MockFileSystemOps::new()
///     .with_file("/src/vimrc")
///     .with_dir("/home/u/.vim/colors");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    entries: std::sync::Mutex<std::collections::BTreeMap<std::path::PathBuf, MockEntry>>,
    fail_symlink: bool,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
enum MockEntry {
    File,
    Dir,
    Symlink(std::path::PathBuf),
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockFileSystemOps {
    /// Create an empty mock filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file at `path`, creating its parent directories.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MockEntry::File);
        self
    }

    /// Add a directory at `path`, creating its ancestors.
    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MockEntry::Dir);
        self
    }

    /// Add a symbolic link at `path` pointing to `target`.
    #[must_use]
    pub fn with_symlink(self, path: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MockEntry::Symlink(target.as_ref().to_path_buf()));
        self
    }

    /// Make every [`FileSystemOps::symlink`] call fail with `PermissionDenied`.
    #[must_use]
    pub const fn failing_symlinks(mut self) -> Self {
        self.fail_symlink = true;
        self
    }

    /// Kind of the entry at `path`, if any.
    pub fn kind(&self, path: impl AsRef<Path>) -> Option<EntryKind> {
        self.lock().get(path.as_ref()).map(MockEntry::kind)
    }

    /// Target of the link at `path`, if `path` is a link.
    pub fn link_target(&self, path: impl AsRef<Path>) -> Option<std::path::PathBuf> {
        match self.lock().get(path.as_ref()) {
            Some(MockEntry::Symlink(target)) => Some(target.clone()),
            _ => None,
        }
    }

    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, std::collections::BTreeMap<std::path::PathBuf, MockEntry>> {
        self.entries.lock().expect("mock filesystem poisoned")
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let mut entries = self.lock();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(MockEntry::Dir);
        }
        entries.insert(path.to_path_buf(), entry);
    }
}

#[cfg(test)]
impl MockEntry {
    const fn kind(&self) -> EntryKind {
        match self {
            Self::File => EntryKind::File,
            Self::Dir => EntryKind::Dir,
            Self::Symlink(_) => EntryKind::Symlink,
        }
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        let entries = self.lock();
        match entries.get(path) {
            Some(MockEntry::Symlink(target)) => {
                matches!(entries.get(target), Some(MockEntry::File | MockEntry::Dir))
            }
            Some(_) => true,
            None => false,
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        let entries = self.lock();
        match entries.get(path) {
            Some(MockEntry::Dir) => true,
            Some(MockEntry::Symlink(target)) => entries.get(target) == Some(&MockEntry::Dir),
            _ => false,
        }
    }

    fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        Ok(self.kind(path))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.lock();
        let mut missing = Vec::new();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            match entries.get(ancestor) {
                Some(MockEntry::Dir) => break,
                Some(_) => return Err(io::Error::from(io::ErrorKind::AlreadyExists)),
                None => missing.push(ancestor.to_path_buf()),
            }
        }
        for dir in missing {
            entries.insert(dir, MockEntry::Dir);
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.lock();
        match entries.get(path) {
            Some(MockEntry::File | MockEntry::Symlink(_)) => {
                entries.remove(path);
                Ok(())
            }
            Some(MockEntry::Dir) => Err(io::Error::from(io::ErrorKind::IsADirectory)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.lock();
        if entries.get(path) != Some(&MockEntry::Dir) {
            return Err(io::Error::from(io::ErrorKind::NotADirectory));
        }
        entries.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        if self.fail_symlink {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        let mut entries = self.lock();
        if entries.contains_key(link) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        entries.insert(link.to_path_buf(), MockEntry::Symlink(target.to_path_buf()));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // SystemFileSystemOps
    // -----------------------------------------------------------------------

    #[test]
    fn entry_kind_of_missing_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kind = SystemFileSystemOps.entry_kind(&dir.path().join("absent")).unwrap();
        assert_eq!(kind, None);
    }

    #[test]
    fn entry_kind_distinguishes_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert_eq!(
            SystemFileSystemOps.entry_kind(&file).unwrap(),
            Some(EntryKind::File)
        );
        assert_eq!(
            SystemFileSystemOps.entry_kind(dir.path()).unwrap(),
            Some(EntryKind::Dir)
        );
    }

    #[cfg(unix)]
    #[test]
    fn entry_kind_reports_dangling_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("/nonexistent/target", &link).unwrap();
        assert_eq!(
            SystemFileSystemOps.entry_kind(&link).unwrap(),
            Some(EntryKind::Symlink)
        );
        assert!(!SystemFileSystemOps.exists(&link));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_is_a_symlink_not_a_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real");
        std::fs::create_dir(&target).unwrap();
        let link = dir.path().join("link");
        SystemFileSystemOps.symlink(&target, &link).unwrap();
        assert_eq!(
            SystemFileSystemOps.entry_kind(&link).unwrap(),
            Some(EntryKind::Symlink)
        );
        SystemFileSystemOps.remove_file(&link).unwrap();
        assert!(target.is_dir(), "removing the link must keep the target");
    }

    // -----------------------------------------------------------------------
    // MockFileSystemOps
    // -----------------------------------------------------------------------

    #[test]
    fn mock_with_file_creates_parents() {
        let fs = MockFileSystemOps::new().with_file("/a/b/c");
        assert_eq!(fs.kind("/a"), Some(EntryKind::Dir));
        assert_eq!(fs.kind("/a/b"), Some(EntryKind::Dir));
        assert_eq!(fs.kind("/a/b/c"), Some(EntryKind::File));
    }

    #[test]
    fn mock_remove_dir_all_removes_descendants() {
        let fs = MockFileSystemOps::new()
            .with_file("/d/x")
            .with_file("/d/sub/y")
            .with_file("/dx");
        fs.remove_dir_all(Path::new("/d")).unwrap();
        assert_eq!(fs.kind("/d"), None);
        assert_eq!(fs.kind("/d/sub/y"), None);
        assert_eq!(fs.kind("/dx"), Some(EntryKind::File));
    }

    #[test]
    fn mock_symlink_refuses_existing_entry() {
        let fs = MockFileSystemOps::new().with_file("/t");
        let err = fs.symlink(Path::new("/s"), Path::new("/t")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn mock_exists_follows_symlinks() {
        let fs = MockFileSystemOps::new()
            .with_file("/src/a")
            .with_symlink("/l/good", "/src/a")
            .with_symlink("/l/dangling", "/src/missing");
        assert!(fs.exists(Path::new("/l/good")));
        assert!(!fs.exists(Path::new("/l/dangling")));
    }

    #[test]
    fn mock_is_dir_follows_symlinks() {
        let fs = MockFileSystemOps::new()
            .with_file("/src/a")
            .with_dir("/shared")
            .with_symlink("/l/dir", "/shared")
            .with_symlink("/l/file", "/src/a");
        assert!(fs.is_dir(Path::new("/shared")));
        assert!(fs.is_dir(Path::new("/l/dir")));
        assert!(!fs.is_dir(Path::new("/src/a")));
        assert!(!fs.is_dir(Path::new("/l/file")));
        assert!(!fs.is_dir(Path::new("/absent")));
    }
}
