//! Generated-file record
//!
//! The record lists every path the engine generated on the last successful
//! sync. It is the only state carried between runs and owns no content,
//! only path identity:
//!
//! ```json
//! {
//!   "version": 1,
//!   "files": [".github/agents/reviewer.agent.md", "AGENTS.md", "opencode.json"]
//! }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use scaffold_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Record location relative to the repository root.
pub const RECORD_PATH: &str = ".agents/.generated.json";

/// Record format version.
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedRecord {
    version: u32,
    files: BTreeSet<NormalizedPath>,
}

impl Default for GeneratedRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratedRecord {
    /// An empty record, as used before the first sync.
    pub fn new() -> Self {
        Self {
            version: RECORD_VERSION,
            files: BTreeSet::new(),
        }
    }

    pub fn from_paths(paths: impl IntoIterator<Item = NormalizedPath>) -> Self {
        Self {
            version: RECORD_VERSION,
            files: paths.into_iter().collect(),
        }
    }

    /// Tracked paths, sorted.
    pub fn files(&self) -> &BTreeSet<NormalizedPath> {
        &self.files
    }

    pub fn contains(&self, path: &NormalizedPath) -> bool {
        self.files.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Load the record under `root`; a missing record is empty.
    ///
    /// # Errors
    ///
    /// [`Error::Record`] when the file is not valid JSON, has an unsupported
    /// version, or lists a path that escapes the root.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(RECORD_PATH);
        let Some(bytes) = io::read_if_exists(&path)? else {
            tracing::debug!(path = %path, "No generated-file record yet");
            return Ok(Self::new());
        };

        let invalid = |message: String| Error::Record {
            path: path.to_native(),
            message,
        };

        let record: GeneratedRecord =
            serde_json::from_slice(&bytes).map_err(|e| invalid(e.to_string()))?;
        if record.version != RECORD_VERSION {
            return Err(invalid(format!(
                "unsupported version {} (expected {RECORD_VERSION})",
                record.version
            )));
        }
        if let Some(unsafe_path) = record.files.iter().find(|p| !p.is_contained()) {
            return Err(invalid(format!(
                "entry '{unsafe_path}' is not a relative path inside the repository"
            )));
        }

        tracing::debug!(path = %path, files = record.files.len(), "Loaded generated-file record");
        Ok(record)
    }

    /// Render the record as it is stored on disk.
    pub fn render(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        Ok(content)
    }

    /// Atomically write the record under `root`.
    pub fn save(&self, root: &NormalizedPath) -> Result<()> {
        let path = root.join(RECORD_PATH);
        io::write_text(&path, &self.render()?)?;
        tracing::debug!(path = %path, files = self.files.len(), "Saved generated-file record");
        Ok(())
    }
}
