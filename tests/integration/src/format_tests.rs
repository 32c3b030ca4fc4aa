//! Manifest format equivalence and generated output formats.

use pretty_assertions::assert_eq;
use rstest::rstest;
use scaffold_core::{SyncEngine, SyncOptions};
use scaffold_test_utils::TestProject;
use scaffold_test_utils::fixture::STANDARD_CANONICAL_FILES;
use serde_json::{Value, json};

const JSON_MANIFEST: &str = r#"{
  "schemaVersion": 1,
  "project": {"name": "demo"},
  "targets": {
    "opencode": {"kind": "opencode"},
    "copilot-cli": {"kind": "copilot"}
  },
  "artifacts": {
    "commands": [
      {"id": "test", "description": "Run the test suite", "canonicalFile": ".agents/commands/test.md"}
    ],
    "agents": [
      {
        "id": "reviewer",
        "description": "Reviews pull requests",
        "promptFile": ".agents/agents/reviewer.md",
        "targets": {"opencode": {"mode": "subagent"}}
      }
    ]
  }
}
"#;

const YAML_MANIFEST: &str = r#"schemaVersion: 1
project:
  name: demo
targets:
  opencode:
    kind: opencode
  copilot-cli:
    kind: copilot
artifacts:
  commands:
    - id: test
      description: Run the test suite
      canonicalFile: .agents/commands/test.md
  agents:
    - id: reviewer
      description: Reviews pull requests
      promptFile: .agents/agents/reviewer.md
      targets:
        opencode:
          mode: subagent
"#;

fn project_with(manifest_path: &str, manifest: &str) -> TestProject {
    let project = TestProject::new().with_file(manifest_path, manifest);
    for (path, content) in STANDARD_CANONICAL_FILES {
        project.write(path, content);
    }
    project
}

fn synced_outputs(project: &TestProject) -> Vec<(String, String)> {
    SyncEngine::new(project.path())
        .sync(&project.manifest(), &SyncOptions::default())
        .unwrap();
    project
        .files()
        .into_iter()
        .filter(|(path, _)| !path.starts_with(".agents/"))
        .collect()
}

#[test]
fn test_json_and_yaml_manifests_generate_the_same_files() {
    let from_yaml = project_with(".agents/manifest.yaml", YAML_MANIFEST);
    let from_json = project_with(".agents/manifest.json", JSON_MANIFEST);

    assert_eq!(synced_outputs(&from_yaml), synced_outputs(&from_json));
}

#[test]
fn test_opencode_config_is_valid_json_pointing_at_canonical_files() {
    let project = project_with(".agents/manifest.yaml", YAML_MANIFEST);
    synced_outputs(&project);

    let config: Value = serde_json::from_str(&project.read("opencode.json")).unwrap();

    assert_eq!(
        config["agent"]["reviewer"],
        json!({
            "description": "Reviews pull requests",
            "prompt": {"file": "./.agents/agents/reviewer.md"},
            "mode": "subagent"
        })
    );
    assert_eq!(
        config["command"]["test"]["template"],
        json!({"file": "./.agents/commands/test.md"})
    );
}

#[rstest]
#[case(".github/agents/reviewer.agent.md", "---\n# agent-scaffold:generated")]
#[case("AGENTS.md", "<!-- agent-scaffold:generated")]
#[case("opencode.json", "{\n  \"$comment\": \"agent-scaffold:generated")]
fn test_banner_leads_every_output(#[case] path: &str, #[case] prefix: &str) {
    let project = project_with(".agents/manifest.yaml", YAML_MANIFEST);
    synced_outputs(&project);

    let content = project.read(path);
    assert!(content.starts_with(prefix), "{path}:\n{content}");
}

#[test]
fn test_agent_pointer_links_relatively_to_canonical_file() {
    let project = project_with(".agents/manifest.yaml", YAML_MANIFEST);
    synced_outputs(&project);

    let content = project.read(".github/agents/reviewer.agent.md");

    assert!(content.contains("name: \"reviewer\""), "{content}");
    assert!(content.contains("description: \"Reviews pull requests\""), "{content}");
    assert!(content.contains("(../../.agents/agents/reviewer.md)"), "{content}");
}
