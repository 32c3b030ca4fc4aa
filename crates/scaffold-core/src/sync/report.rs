//! Sync report types

use serde::Serialize;

use scaffold_fs::NormalizedPath;

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Restrict writing to one named target
    pub target: Option<String>,
    /// Delete files tracked by the previous record that are no longer generated
    pub prune: bool,
    /// Compute and report the plan without touching the filesystem
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_prune(mut self) -> Self {
        self.prune = true;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}

/// Outcome of a sync (or, with `dry_run`, what a sync would do).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub dry_run: bool,
    /// Targets whose outputs were written, in declaration order
    pub targets: Vec<String>,
    /// Outputs that did not exist on disk
    pub created: Vec<NormalizedPath>,
    /// Outputs whose content differed from disk
    pub updated: Vec<NormalizedPath>,
    /// Outputs already byte-identical on disk
    pub unchanged: Vec<NormalizedPath>,
    /// Previously generated files removed by prune
    pub stale: Vec<NormalizedPath>,
    /// Previously generated files no longer produced, kept because prune was off
    pub retained: Vec<NormalizedPath>,
    /// Directories left empty by prune and removed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_dirs: Vec<NormalizedPath>,
}

impl SyncReport {
    /// Files written (or to be written): created plus updated.
    pub fn to_write(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.created.iter().chain(self.updated.iter())
    }

    pub fn to_write_count(&self) -> usize {
        self.created.len() + self.updated.len()
    }

    /// Whether the run changed (or would change) anything on disk.
    pub fn has_changes(&self) -> bool {
        self.to_write_count() > 0 || !self.stale.is_empty()
    }
}
