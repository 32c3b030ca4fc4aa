//! SyncEngine implementation
//!
//! The SyncEngine drives every enabled target's generator, compares the
//! rendered outputs with the disk and the previous generated-file record,
//! then writes, prunes and persists the new record.

use std::collections::{BTreeMap, HashMap};

use scaffold_fs::{NormalizedPath, io};
use scaffold_generators::{generator_for, has_banner};
use scaffold_manifest::{ArtifactRef, MANIFEST_JSON, MANIFEST_YAML, Manifest};

use super::plan::{PlannedWrite, SyncPlan, WriteAction};
use super::report::{SyncOptions, SyncReport};
use crate::record::{GeneratedRecord, RECORD_PATH};
use crate::{Error, Result};

/// A rendered output, possibly shared by several targets.
struct RenderedOutput {
    content: String,
    /// Description of the first producer, for conflict messages
    owner: String,
    in_scope: bool,
}

/// Engine for synchronizing generated files with the manifest
///
/// Sync is split into two phases:
/// - **plan**: render everything and classify each path (pure apart from reads)
/// - **apply**: write, delete and persist the record
pub struct SyncEngine {
    root: NormalizedPath,
}

impl SyncEngine {
    /// Create an engine for the repository at `root`.
    pub fn new(root: NormalizedPath) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Load the generated-file record, empty when none exists yet.
    pub fn load_record(&self) -> Result<GeneratedRecord> {
        GeneratedRecord::load(&self.root)
    }

    /// Run a full sync: load the record, plan, and apply unless `dry_run`.
    pub fn sync(&self, manifest: &Manifest, options: &SyncOptions) -> Result<SyncReport> {
        let previous = self.load_record()?;
        let plan = self.plan(manifest, &previous, options)?;

        if options.dry_run {
            let report = plan.report(true);
            tracing::info!(
                to_write = report.to_write_count(),
                stale = report.stale.len(),
                "Dry run complete; nothing written"
            );
            return Ok(report);
        }

        self.apply(&plan)
    }

    /// Render all outputs and classify them against disk and `previous`.
    ///
    /// A recorded path that is no longer produced is only marked stale when
    /// it still carries the banner and is not a canonical or engine file.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownTarget`] if the target filter names an undeclared target
    /// - [`Error::Conflict`] if two outputs collide on one path with different
    ///   content, or an output would overwrite a canonical or engine file
    /// - any generator or I/O error while rendering or reading current content
    pub fn plan(
        &self,
        manifest: &Manifest,
        previous: &GeneratedRecord,
        options: &SyncOptions,
    ) -> Result<SyncPlan> {
        let scope = resolve_scope(manifest, options.target.as_deref())?;
        let reserved = reserved_paths(manifest);
        let mut outputs: BTreeMap<NormalizedPath, RenderedOutput> = BTreeMap::new();

        for target in manifest.enabled_targets() {
            let generator = generator_for(target);
            let in_scope = scope.contains(&target.name.as_str());
            let descriptors = generator.enumerate_outputs(manifest);
            let mut seen: HashMap<&NormalizedPath, String> = HashMap::new();
            for descriptor in &descriptors {
                let owner = format!("{} {}", target.name, descriptor.key);

                if let Some(first) = seen.insert(&descriptor.path, owner.clone()) {
                    return Err(conflict(&descriptor.path, first, owner));
                }
                if let Some(label) = reserved.get(&descriptor.path) {
                    return Err(conflict(&descriptor.path, label.clone(), owner));
                }

                let content = generator.render(descriptor)?;
                match outputs.get_mut(&descriptor.path) {
                    Some(existing) if existing.content == content => {
                        tracing::debug!(path = %descriptor.path, target_name = %target.name, "Output shared with another target");
                        existing.in_scope |= in_scope;
                    }
                    Some(existing) => {
                        return Err(conflict(&descriptor.path, existing.owner.clone(), owner));
                    }
                    None => {
                        outputs.insert(
                            descriptor.path.clone(),
                            RenderedOutput {
                                content,
                                owner,
                                in_scope,
                            },
                        );
                    }
                }
            }
        }

        let mut writes = Vec::new();
        let mut unchanged = Vec::new();
        for (path, output) in outputs.iter().filter(|(_, o)| o.in_scope) {
            let full = self.root.join(path.as_str());
            match io::read_if_exists(&full)? {
                Some(current) if current == output.content.as_bytes() => {
                    tracing::debug!(path = %path, "Unchanged");
                    unchanged.push(path.clone());
                }
                Some(current) => {
                    if !previous.contains(path) && !has_banner(&current) {
                        tracing::warn!(
                            path = %path,
                            "Overwriting a file that agent-scaffold did not generate"
                        );
                    }
                    writes.push(PlannedWrite {
                        path: path.clone(),
                        content: output.content.clone(),
                        action: WriteAction::Update,
                        previous: Some(String::from_utf8_lossy(&current).into_owned()),
                    });
                }
                None => writes.push(PlannedWrite {
                    path: path.clone(),
                    content: output.content.clone(),
                    action: WriteAction::Create,
                    previous: None,
                }),
            }
        }

        let record = GeneratedRecord::from_paths(outputs.into_keys());
        let mut stale = Vec::new();
        let mut retained = Vec::new();
        for path in previous.files().iter().filter(|p| !record.contains(p)) {
            if let Some(label) = reserved.get(path) {
                tracing::warn!(path = %path, owner = %label, "Previously generated path is now reserved; not pruning");
                continue;
            }
            let full = self.root.join(path.as_str());
            if !full.is_file() {
                tracing::debug!(path = %path, "Previously generated file already gone");
                continue;
            }
            let current = io::read_if_exists(&full)?.unwrap_or_default();
            if !has_banner(&current) {
                tracing::warn!(path = %path, "Previously generated file lost its banner; not pruning");
                retained.push(path.clone());
                continue;
            }
            if options.prune {
                stale.push(path.clone());
            } else {
                retained.push(path.clone());
            }
        }

        Ok(SyncPlan {
            targets: scope.into_iter().map(str::to_string).collect(),
            writes,
            unchanged,
            stale,
            retained,
            record,
        })
    }

    /// Write every planned output, delete stale files, and persist the record.
    ///
    /// Not transactional: an I/O failure midway leaves earlier writes in
    /// place. Running sync again converges.
    pub fn apply(&self, plan: &SyncPlan) -> Result<SyncReport> {
        for write in &plan.writes {
            io::write_text(&self.root.join(write.path.as_str()), &write.content)?;
            tracing::debug!(path = %write.path, action = ?write.action, "Wrote generated file");
        }

        let mut removed_dirs = Vec::new();
        for path in &plan.stale {
            let full = self.root.join(path.as_str());
            if !io::remove_file(&full)? {
                continue;
            }
            tracing::debug!(path = %path, "Pruned stale file");
            if let Some(parent) = full.parent() {
                removed_dirs.extend(
                    io::prune_empty_dirs(&parent, &self.root)?
                        .iter()
                        .map(|dir| self.relative(dir)),
                );
            }
        }

        let record_path = self.root.join(RECORD_PATH);
        let rendered = plan.record.render()?;
        if io::read_if_exists(&record_path)?.as_deref() != Some(rendered.as_bytes()) {
            io::write_text(&record_path, &rendered)?;
        }

        let mut report = plan.report(false);
        report.removed_dirs = removed_dirs;
        tracing::info!(
            created = report.created.len(),
            updated = report.updated.len(),
            unchanged = report.unchanged.len(),
            pruned = report.stale.len(),
            "Sync complete"
        );
        Ok(report)
    }

    fn relative(&self, path: &NormalizedPath) -> NormalizedPath {
        let prefix = format!("{}/", self.root);
        path.as_str()
            .strip_prefix(&prefix)
            .map(NormalizedPath::new)
            .unwrap_or_else(|| path.clone())
    }
}

/// Enabled targets whose outputs get written, in declaration order.
fn resolve_scope<'m>(manifest: &'m Manifest, filter: Option<&str>) -> Result<Vec<&'m str>> {
    let Some(name) = filter else {
        return Ok(manifest.enabled_targets().map(|t| t.name.as_str()).collect());
    };

    let target = manifest.target(name).ok_or_else(|| Error::UnknownTarget {
        name: name.to_string(),
        available: manifest.target_names().into_iter().map(str::to_string).collect(),
    })?;
    if !target.enabled {
        tracing::warn!(target_name = %name, "Target is disabled; nothing to generate");
        return Ok(Vec::new());
    }
    Ok(vec![target.name.as_str()])
}

/// Paths no generated output may claim, with a label for conflict messages.
fn reserved_paths(manifest: &Manifest) -> HashMap<NormalizedPath, String> {
    let mut reserved = HashMap::new();
    reserved.insert(
        NormalizedPath::new(RECORD_PATH),
        "the generated-file record".to_string(),
    );
    for manifest_file in [MANIFEST_YAML, MANIFEST_JSON] {
        reserved.insert(NormalizedPath::new(manifest_file), "the manifest".to_string());
    }
    for artifact in manifest.artifacts.iter() {
        let label = format!("canonical {} '{}'", artifact.kind(), artifact.id());
        reserved.insert(artifact.canonical_path().clone(), label.clone());
        if let ArtifactRef::Skill(skill) = artifact {
            reserved.insert(skill.skill_file.clone(), label);
        }
    }
    reserved
}

fn conflict(path: &NormalizedPath, first: String, second: String) -> Error {
    Error::Conflict {
        path: path.clone(),
        first,
        second,
    }
}
