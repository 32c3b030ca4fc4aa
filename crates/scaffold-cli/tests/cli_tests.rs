//! Integration tests for the agent-scaffold binary.
//!
//! These tests exercise the compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use scaffold_test_utils::TestProject;
use scaffold_test_utils::fixture::STANDARD_OUTPUTS;

/// Get a Command for the agent-scaffold binary rooted at `project`
fn scaffold_cmd(project: &TestProject) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agent-scaffold"));
    cmd.arg("--root")
        .arg(project.root())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    let project = TestProject::new();
    scaffold_cmd(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_version_output() {
    let project = TestProject::new();
    scaffold_cmd(&project)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent-scaffold"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_writes_starter_manifest() {
    let project = TestProject::new();

    scaffold_cmd(&project)
        .args(["init", "--name", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    project.assert_file_contains(".agents/manifest.yaml", "name: demo");
    project.assert_file_contains(".agents/manifest.yaml", "copilot-cli");
    for dir in [
        ".agents/prompts",
        ".agents/commands",
        ".agents/agents",
        ".agents/instructions",
        ".agents/skills",
    ] {
        assert!(project.full_path(dir).is_dir(), "{dir} missing");
    }
}

#[test]
fn test_init_refuses_to_overwrite() {
    let project = TestProject::standard();

    scaffold_cmd(&project)
        .arg("init")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    project.assert_file_contains(".agents/manifest.yaml", "release-notes");
}

#[test]
fn test_init_force_overwrites() {
    let project = TestProject::standard();

    scaffold_cmd(&project)
        .args(["init", "--force", "--name", "fresh"])
        .assert()
        .success();

    project.assert_file_contains(".agents/manifest.yaml", "name: fresh");
}

#[test]
fn test_init_then_sync_then_doctor() {
    let project = TestProject::new();

    scaffold_cmd(&project).arg("init").assert().success();
    scaffold_cmd(&project).arg("sync").assert().success();
    scaffold_cmd(&project).arg("doctor").assert().success();

    project.assert_file_exists("opencode.json");
    project.assert_file_contains("AGENTS.md", "No instructions are declared yet.");
}

// ============================================================================
// Sync Tests
// ============================================================================

#[test]
fn test_sync_reports_created_files() {
    let project = TestProject::standard();

    scaffold_cmd(&project)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("opencode.json"));

    for path in STANDARD_OUTPUTS {
        project.assert_file_exists(path);
    }
}

#[test]
fn test_sync_twice_reports_no_changes() {
    let project = TestProject::standard();
    scaffold_cmd(&project).arg("sync").assert().success();

    scaffold_cmd(&project)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already synchronized"));
}

#[test]
fn test_sync_json_report() {
    let project = TestProject::standard();

    let output = scaffold_cmd(&project)
        .args(["sync", "--dry-run", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(
        report["created"].as_array().unwrap().len(),
        STANDARD_OUTPUTS.len()
    );
    project.assert_file_not_exists("opencode.json");
}

#[test]
fn test_sync_unknown_target_fails() {
    let project = TestProject::standard();

    scaffold_cmd(&project)
        .args(["sync", "--target", "cursor"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown target 'cursor'"));
}

#[test]
fn test_sync_without_manifest_fails() {
    let project = TestProject::new();

    scaffold_cmd(&project)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_sync_invalid_manifest_writes_nothing() {
    let project = TestProject::new().with_manifest("schemaVersion: 1\nproject:\n  name: demo\nbogus: true\n");
    let before = project.files();

    scaffold_cmd(&project).arg("sync").assert().failure();

    assert_eq!(project.files(), before);
}

// ============================================================================
// Diff Tests
// ============================================================================

#[test]
fn test_diff_shows_new_files() {
    let project = TestProject::standard();

    scaffold_cmd(&project)
        .arg("diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("+++ b/opencode.json"))
        .stdout(predicate::str::contains("/dev/null"));

    project.assert_file_not_exists("opencode.json");
}

#[test]
fn test_diff_after_sync_is_clean() {
    let project = TestProject::standard();
    scaffold_cmd(&project).arg("sync").assert().success();

    scaffold_cmd(&project)
        .arg("diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes needed"));
}

// ============================================================================
// Doctor Tests
// ============================================================================

#[test]
fn test_doctor_passes_on_standard_project() {
    let project = TestProject::standard();

    scaffold_cmd(&project)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS canonical-files"));
}

#[test]
fn test_doctor_fails_on_missing_canonical_file() {
    let project = TestProject::standard();
    project.remove(".agents/agents/reviewer.md");

    scaffold_cmd(&project)
        .arg("doctor")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("FAIL canonical-files"));
}

#[test]
fn test_doctor_json_output() {
    let project = TestProject::new();

    let output = scaffold_cmd(&project)
        .args(["doctor", "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["results"].as_array().unwrap().len(), 7);
    assert_eq!(report["results"][0]["name"], "manifest");
    assert_eq!(report["results"][0]["passed"], false);
}
