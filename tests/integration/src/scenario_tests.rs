//! End-to-end scenarios: manifest on disk, sync, doctor, files on disk.

use pretty_assertions::assert_eq;
use scaffold_core::doctor::CHECK_UNIQUE_IDS;
use scaffold_core::{Doctor, RECORD_PATH, SyncEngine, SyncOptions, SyncReport};
use scaffold_fs::NormalizedPath;
use scaffold_test_utils::TestProject;
use scaffold_test_utils::fixture::{STANDARD_CANONICAL_FILES, STANDARD_OUTPUTS};

fn sync(project: &TestProject, options: SyncOptions) -> SyncReport {
    SyncEngine::new(project.path())
        .sync(&project.manifest(), &options)
        .unwrap()
}

/// Generated files only, without the manifest, canonical files or record.
fn generated(project: &TestProject) -> Vec<String> {
    project
        .files()
        .into_keys()
        .filter(|path| !path.starts_with(".agents/"))
        .collect()
}

// =============================================================================
// Single path-scoped instruction
// =============================================================================

const TYPESCRIPT_RULES: &str = r#"schemaVersion: 1
project:
  name: demo
targets:
  copilot-vscode:
    kind: copilot
    promptsDir: .github/prompts
artifacts:
  instructions:
    - id: typescript-rules
      scope: path
      applyTo: "**/*.ts"
      canonicalFile: .agents/instructions/typescript-rules.md
"#;

#[test]
fn test_path_instruction_produces_exactly_one_file() {
    let project = TestProject::new()
        .with_manifest(TYPESCRIPT_RULES)
        .with_file(".agents/instructions/typescript-rules.md", "Use strict mode.\n");

    let report = sync(&project, SyncOptions::default());

    let path = ".github/instructions/typescript-rules.instructions.md";
    assert_eq!(generated(&project), vec![path.to_string()]);
    assert_eq!(report.created.len(), 1);

    let content = project.read(path);
    assert!(content.contains("applyTo: \"**/*.ts\""), "{content}");
    assert!(
        content.contains("`.agents/instructions/typescript-rules.md`"),
        "{content}"
    );
}

// =============================================================================
// Doctor on duplicate identifiers
// =============================================================================

#[test]
fn test_doctor_names_duplicate_reviewer() {
    let project = TestProject::new()
        .with_manifest(
            r#"schemaVersion: 1
project:
  name: demo
targets:
  copilot-cli:
    kind: copilot
artifacts:
  agents:
    - id: reviewer
      description: First
      promptFile: .agents/agents/reviewer.md
    - id: reviewer
      description: Second
      promptFile: .agents/agents/reviewer.md
"#,
        )
        .with_file(".agents/agents/reviewer.md", "Review.\n");

    let report = Doctor::new(project.path()).run();

    let check = report.get(CHECK_UNIQUE_IDS).unwrap();
    assert!(!check.passed);
    assert!(check.detail.contains("reviewer"));
    assert!(!report.passed());
}

// =============================================================================
// Dry run after sync
// =============================================================================

#[test]
fn test_dry_run_after_sync_is_empty() {
    let project = TestProject::standard();
    sync(&project, SyncOptions::default());

    let report = sync(&project, SyncOptions::default().dry_run().with_prune());

    assert_eq!(report.to_write_count(), 0);
    assert!(report.stale.is_empty());
}

// =============================================================================
// Prune lifecycle
// =============================================================================

const REVIEWER_AGENT: &str = r#"  agents:
    - id: reviewer
      description: Reviews pull requests
      promptFile: .agents/agents/reviewer.md
      targets:
        opencode:
          mode: subagent
"#;

#[test]
fn test_added_then_removed_artifact_is_pruned() {
    let project = TestProject::standard();
    let manifest = project.read(".agents/manifest.yaml");
    let without_agent = manifest.replace(REVIEWER_AGENT, "");
    assert_ne!(without_agent, manifest);

    project.write(".agents/manifest.yaml", &without_agent);
    sync(&project, SyncOptions::default());
    project.assert_file_not_exists(".github/agents/reviewer.agent.md");

    project.write(".agents/manifest.yaml", &manifest);
    sync(&project, SyncOptions::default());
    project.assert_file_exists(".github/agents/reviewer.agent.md");
    assert!(project.read("opencode.json").contains("\"reviewer\""));

    project.write(".agents/manifest.yaml", &without_agent);
    let report = sync(&project, SyncOptions::default().with_prune());

    assert_eq!(
        report.stale,
        vec![NormalizedPath::new(".github/agents/reviewer.agent.md")]
    );
    assert_eq!(report.updated, vec![NormalizedPath::new("opencode.json")]);
    project.assert_file_not_exists(".github/agents");
    assert!(!project.read("opencode.json").contains("\"reviewer\""));
    assert!(!project.read(RECORD_PATH).contains("reviewer"));
}

#[test]
fn test_removed_artifact_without_prune_stays_on_disk() {
    let project = TestProject::standard();
    sync(&project, SyncOptions::default());

    let manifest = project.read(".agents/manifest.yaml");
    project.write(".agents/manifest.yaml", &manifest.replace(REVIEWER_AGENT, ""));
    sync(&project, SyncOptions::default());

    project.assert_file_exists(".github/agents/reviewer.agent.md");
    assert!(!project.read(RECORD_PATH).contains("reviewer"));

    // Once forgotten by the record, a later prune leaves the file alone.
    sync(&project, SyncOptions::default().with_prune());
    project.assert_file_exists(".github/agents/reviewer.agent.md");
}

// =============================================================================
// Determinism and non-duplication
// =============================================================================

#[test]
fn test_identical_manifests_produce_identical_bytes() {
    let first = TestProject::standard();
    let second = TestProject::standard();

    sync(&first, SyncOptions::default());
    sync(&second, SyncOptions::default());

    assert_eq!(first.files(), second.files());
    assert_eq!(generated(&first), STANDARD_OUTPUTS);
}

#[test]
fn test_no_generated_file_reproduces_canonical_prose() {
    let project = TestProject::standard();
    sync(&project, SyncOptions::default());

    for path in STANDARD_OUTPUTS {
        let content = project.read(path);
        for (canonical, prose) in STANDARD_CANONICAL_FILES {
            assert!(
                !content.contains(prose.trim_end()),
                "{path} copies the body of {canonical}"
            );
        }
    }
}

#[test]
fn test_idempotent_across_every_target() {
    let project = TestProject::standard();
    sync(&project, SyncOptions::default());
    let snapshot = project.files();

    for target in ["opencode", "copilot-vscode", "copilot-cli"] {
        let report = sync(&project, SyncOptions::default().with_target(target));
        assert_eq!(report.to_write_count(), 0, "{target}");
    }
    let report = sync(&project, SyncOptions::default().with_prune());

    assert!(!report.has_changes());
    assert_eq!(project.files(), snapshot);
}
