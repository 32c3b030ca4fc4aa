//! [`TestProject`] builder for agent-scaffold test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use scaffold_fs::NormalizedPath;
use scaffold_manifest::{MANIFEST_YAML, Manifest, load_manifest};
use tempfile::TempDir;

use crate::fixture::{STANDARD_CANONICAL_FILES, STANDARD_MANIFEST};

/// A temporary repository directory with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use scaffold_test_utils::TestProject;
///
/// let project = TestProject::standard();
/// project.assert_file_exists(".agents/manifest.yaml");
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
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Project with the standard fixture manifest and all its canonical files.
    pub fn standard() -> Self {
        let project = Self::new().with_manifest(STANDARD_MANIFEST);
        for (path, content) in STANDARD_CANONICAL_FILES {
            project.write(path, content);
        }
        project
    }

    /// Write `yaml` to `.agents/manifest.yaml`.
    pub fn with_manifest(self, yaml: &str) -> Self {
        self.write(MANIFEST_YAML, yaml);
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.write(path, content);
        self
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root as a [`NormalizedPath`], as the engine APIs take it.
    pub fn path(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        self.root().join(path)
    }

    /// Load and validate the project's manifest.
    pub fn manifest(&self) -> Manifest {
        load_manifest(&self.path()).unwrap()
    }

    /// Write `content` to `path`, creating parent directories.
    pub fn write(&self, path: &str, content: &str) {
        let full = self.full_path(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    pub fn read(&self, path: &str) -> String {
        let full = self.full_path(path);
        fs::read_to_string(&full)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full.display()))
    }

    pub fn remove(&self, path: &str) {
        fs::remove_file(self.full_path(path)).unwrap();
    }

    pub fn exists(&self, path: &str) -> bool {
        self.full_path(path).exists()
    }

    /// Every file under the root keyed by its `/`-separated relative path.
    pub fn files(&self) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        collect(self.root(), self.root(), &mut files);
        files
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.full_path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.full_path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {path} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<String, String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap();
            let key = NormalizedPath::new(relative).as_str().to_string();
            files.insert(key, fs::read_to_string(&path).unwrap_or_default());
        }
    }
}
