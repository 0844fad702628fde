//! [`TestTree`] builder for synchronization test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::snapshot::{Entry, snapshot};

/// A temporary directory with helpers for laying out and inspecting trees.
///
/// Paths passed to helpers are relative to the root and use `/`.
///
/// # Example
///
/// ```rust,no_run
/// use fsync_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.file("src/a.txt", "alpha").dir("src/empty");
/// tree.assert_file_content("src/a.txt", "alpha");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` under the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file, creating parent directories as needed.
    pub fn file(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestTree::file: cannot create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestTree::file: cannot write {}: {e}", path.display()));
        self
    }

    /// Create a directory and its parents.
    pub fn dir(&self, rel: &str) -> &Self {
        let path = self.path(rel);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("TestTree::dir: cannot create {}: {e}", path.display()));
        self
    }

    /// Set permission bits on an existing entry.
    #[cfg(unix)]
    pub fn mode(&self, rel: &str, mode: u32) -> &Self {
        use std::os::unix::fs::PermissionsExt;
        let path = self.path(rel);
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))
            .unwrap_or_else(|e| panic!("TestTree::mode: cannot chmod {}: {e}", path.display()));
        self
    }

    /// Create a symbolic link at `rel` pointing to `target` (used verbatim).
    #[cfg(unix)]
    pub fn symlink(&self, rel: &str, target: impl AsRef<Path>) -> &Self {
        let path = self.path(rel);
        std::os::unix::fs::symlink(target.as_ref(), &path)
            .unwrap_or_else(|e| panic!("TestTree::symlink: cannot link {}: {e}", path.display()));
        self
    }

    /// Permission bits of `rel`.
    #[cfg(unix)]
    pub fn mode_of(&self, rel: &str) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        let path = self.path(rel);
        fs::metadata(&path)
            .unwrap_or_else(|e| panic!("TestTree::mode_of: cannot stat {}: {e}", path.display()))
            .permissions()
            .mode()
            & 0o777
    }

    /// Read a file as UTF-8.
    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("TestTree::read: cannot read {}: {e}", path.display()))
    }

    /// Snapshot of everything under `rel` (see [`snapshot`]).
    pub fn snapshot(&self, rel: &str) -> std::collections::BTreeMap<String, Entry> {
        snapshot(&self.path(rel))
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(
            fs::symlink_metadata(&path).is_ok(),
            "Expected path to exist: {}",
            path.display()
        );
    }

    /// Assert that nothing (not even a dangling link) is at `rel`.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_missing(&self, rel: &str) {
        let path = self.path(rel);
        assert!(
            fs::symlink_metadata(&path).is_err(),
            "Expected path NOT to exist: {}",
            path.display()
        );
    }

    /// Assert that `rel` is a regular file holding exactly `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or its content differs.
    pub fn assert_file_content(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        assert!(path.is_file(), "Expected a file at {}", path.display());
        assert_eq!(self.read(rel), content, "content mismatch at {}", path.display());
    }

    /// Assert that `rel` is a directory.
    ///
    /// # Panics
    /// Panics if `rel` is missing or not a directory.
    pub fn assert_dir(&self, rel: &str) {
        let path = self.path(rel);
        assert!(path.is_dir(), "Expected a directory at {}", path.display());
    }
}
