//! [`TestProject`] — a temporary target directory for composition tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary project directory with helper methods for setup and
/// assertion.
///
/// # Example
///
/// ```rust
/// use stack_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write("existing.txt", "kept\n");
/// project.assert_file_exists("existing.txt");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestProject: failed to create temp dir"),
        }
    }

    /// Return the project root path.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("TestProject::write: create parent dirs");
        }
        fs::write(&full_path, content).expect("TestProject::write: write file");
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that a file's content contains `needle`.
    pub fn assert_contains(&self, path: &str, needle: &str) {
        let content = self.read(path);
        assert!(
            content.contains(needle),
            "expected {path} to contain {needle:?}, got:\n{content}"
        );
    }
}
