//! Read-only consistency checks over the manifest and the filesystem
//!
//! Every check is independent and total: a failure is reported in the
//! [`DoctorReport`], never returned as an error, and one failing check does
//! not stop the others from running. Checks after the first two work on the
//! parsed (not yet validated) document, so they still report useful detail
//! when schema validation fails.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use scaffold_fs::NormalizedPath;
use scaffold_manifest::id::is_kebab_case;
use scaffold_manifest::{ArtifactEntry, Manifest, ManifestDocument, find_manifest, load_document};

/// Outcome of one doctor check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn pass(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            detail: detail.into(),
        }
    }

    /// Pass when `problems` is empty, otherwise fail listing them.
    fn from_problems(name: &str, problems: Vec<String>, ok: impl Into<String>) -> Self {
        if problems.is_empty() {
            Self::pass(name, ok)
        } else {
            Self::fail(name, problems.join("; "))
        }
    }
}

/// Ordered results of a doctor run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub results: Vec<CheckResult>,
}

impl DoctorReport {
    /// True only when every check passed.
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

pub const CHECK_MANIFEST: &str = "manifest";
pub const CHECK_SCHEMA: &str = "schema";
pub const CHECK_CANONICAL_FILES: &str = "canonical-files";
pub const CHECK_UNIQUE_IDS: &str = "unique-ids";
pub const CHECK_ID_FORMAT: &str = "id-format";
pub const CHECK_OVERRIDE_TARGETS: &str = "override-targets";
pub const CHECK_PATH_GLOBS: &str = "path-globs";

const UNLOADED: &str = "Cannot load manifest";

/// Runs the doctor checks for a repository.
pub struct Doctor {
    root: NormalizedPath,
}

impl Doctor {
    pub fn new(root: NormalizedPath) -> Self {
        Self { root }
    }

    /// Run every check. Never mutates anything.
    pub fn run(&self) -> DoctorReport {
        let (manifest_check, document) = self.check_manifest();
        let mut results = vec![manifest_check];

        match document {
            Some(document) => {
                results.push(check_schema(&document));
                results.push(self.check_canonical_files(&document));
                results.push(check_unique_ids(&document));
                results.push(check_id_format(&document));
                results.push(check_override_targets(&document));
                results.push(check_path_globs(&document));
            }
            None => {
                for name in [
                    CHECK_SCHEMA,
                    CHECK_CANONICAL_FILES,
                    CHECK_UNIQUE_IDS,
                    CHECK_ID_FORMAT,
                    CHECK_OVERRIDE_TARGETS,
                    CHECK_PATH_GLOBS,
                ] {
                    results.push(CheckResult::fail(name, UNLOADED));
                }
            }
        }

        let report = DoctorReport { results };
        tracing::info!(
            checks = report.results.len(),
            failed = report.failures().count(),
            "Doctor finished"
        );
        report
    }

    fn check_manifest(&self) -> (CheckResult, Option<ManifestDocument>) {
        let Some(location) = find_manifest(&self.root) else {
            return (
                CheckResult::fail(
                    CHECK_MANIFEST,
                    "No manifest found at .agents/manifest.yaml or .agents/manifest.json",
                ),
                None,
            );
        };
        match load_document(&location) {
            Ok(document) => (
                CheckResult::pass(CHECK_MANIFEST, format!("Loaded {}", location.path)),
                Some(document),
            ),
            Err(e) => (CheckResult::fail(CHECK_MANIFEST, e.to_string()), None),
        }
    }

    fn check_canonical_files(&self, document: &ManifestDocument) -> CheckResult {
        let mut problems = Vec::new();
        let mut checked = 0;
        for entry in document.artifacts.entries() {
            for path in &entry.canonical {
                checked += 1;
                if !path.is_contained() {
                    problems.push(format!("{} '{}': unsafe path {path}", entry.kind, entry.id));
                } else if !self.root.join(path.as_str()).exists() {
                    problems.push(format!("{} '{}': missing {path}", entry.kind, entry.id));
                }
            }
        }
        CheckResult::from_problems(
            CHECK_CANONICAL_FILES,
            problems,
            format!("{checked} canonical paths present"),
        )
    }
}

fn check_schema(document: &ManifestDocument) -> CheckResult {
    match Manifest::from_document(document.clone()) {
        Ok(manifest) => CheckResult::pass(
            CHECK_SCHEMA,
            format!(
                "{} targets, {} artifacts",
                manifest.targets.len(),
                manifest.artifacts.iter().count()
            ),
        ),
        Err(e) => CheckResult::fail(CHECK_SCHEMA, e.to_string()),
    }
}

fn check_unique_ids(document: &ManifestDocument) -> CheckResult {
    let mut counts: BTreeMap<(scaffold_manifest::ArtifactKind, &str), usize> = BTreeMap::new();
    for entry in document.artifacts.entries() {
        *counts.entry((entry.kind, entry.id)).or_default() += 1;
    }
    let problems = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((kind, id), count)| format!("{kind} '{id}' declared {count} times"))
        .collect();
    CheckResult::from_problems(CHECK_UNIQUE_IDS, problems, "All identifiers are unique within their kind")
}

fn check_id_format(document: &ManifestDocument) -> CheckResult {
    let problems = document
        .artifacts
        .entries()
        .into_iter()
        .filter(|entry| !is_kebab_case(entry.id))
        .map(|entry| format!("{} '{}' is not kebab-case", entry.kind, entry.id))
        .collect();
    CheckResult::from_problems(CHECK_ID_FORMAT, problems, "All identifiers are kebab-case")
}

fn check_override_targets(document: &ManifestDocument) -> CheckResult {
    let declared: BTreeSet<&str> = document.targets.names().collect();
    let mut problems: Vec<String> = document
        .project
        .default_targets
        .iter()
        .filter(|name| !declared.contains(name.as_str()))
        .map(|name| format!("project.defaultTargets names undeclared target '{name}'"))
        .collect();

    for entry in document.artifacts.entries() {
        problems.extend(unknown_targets(&entry, &declared));
    }
    CheckResult::from_problems(
        CHECK_OVERRIDE_TARGETS,
        problems,
        "All overrides reference declared targets",
    )
}

fn unknown_targets(entry: &ArtifactEntry<'_>, declared: &BTreeSet<&str>) -> Vec<String> {
    entry
        .targets
        .keys()
        .filter(|name| !declared.contains(name.as_str()))
        .map(|name| format!("{} '{}' overrides undeclared target '{name}'", entry.kind, entry.id))
        .collect()
}

fn check_path_globs(document: &ManifestDocument) -> CheckResult {
    let problems = document
        .artifacts
        .entries()
        .into_iter()
        .filter(|entry| matches!(entry.apply_to, Some(glob) if glob.is_none_or(|g| g.trim().is_empty())))
        .map(|entry| format!("instruction '{}' has path scope but no applyTo glob", entry.id))
        .collect();
    CheckResult::from_problems(
        CHECK_PATH_GLOBS,
        problems,
        "Every path-scoped instruction declares a glob",
    )
}
