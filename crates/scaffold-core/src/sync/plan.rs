//! Sync plan: what a run will write, keep and delete

use scaffold_fs::NormalizedPath;

use super::report::SyncReport;
use crate::record::GeneratedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
}

/// One output whose disk content must change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    pub path: NormalizedPath,
    pub content: String,
    pub action: WriteAction,
    /// Current disk content for updates
    pub previous: Option<String>,
}

/// Fully rendered sync plan.
///
/// Building a plan renders every output up front, so a generator failure
/// surfaces before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    /// Targets whose outputs are written, in declaration order
    pub targets: Vec<String>,
    pub writes: Vec<PlannedWrite>,
    pub unchanged: Vec<NormalizedPath>,
    /// Previously generated files to delete (prune only)
    pub stale: Vec<NormalizedPath>,
    /// Previously generated files no longer produced but kept on disk
    pub retained: Vec<NormalizedPath>,
    /// Record to persist: every output path of every enabled target
    pub record: GeneratedRecord,
}

impl SyncPlan {
    pub fn report(&self, dry_run: bool) -> SyncReport {
        let paths = |action: WriteAction| {
            self.writes
                .iter()
                .filter(|w| w.action == action)
                .map(|w| w.path.clone())
                .collect()
        };
        SyncReport {
            dry_run,
            targets: self.targets.clone(),
            created: paths(WriteAction::Create),
            updated: paths(WriteAction::Update),
            unchanged: self.unchanged.clone(),
            stale: self.stale.clone(),
            retained: self.retained.clone(),
            removed_dirs: Vec::new(),
        }
    }
}
