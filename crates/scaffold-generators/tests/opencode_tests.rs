//! OpenCode generator output

use pretty_assertions::assert_eq;
use scaffold_generators::{Generator, OpenCodeGenerator};
use scaffold_manifest::{Manifest, ManifestDocument, TargetConfig};
use serde_json::{Value, json};

fn manifest(artifacts: Value) -> Manifest {
    let document: ManifestDocument = serde_json::from_value(json!({
        "schemaVersion": 1,
        "project": {"name": "demo"},
        "targets": {"opencode": {"kind": "opencode"}},
        "artifacts": artifacts
    }))
    .unwrap();
    Manifest::from_document(document).unwrap()
}

fn generate(manifest: &Manifest) -> Vec<(String, String)> {
    let TargetConfig::OpenCode(config) = &manifest.target("opencode").unwrap().config else {
        panic!("expected opencode target");
    };
    OpenCodeGenerator::new("opencode", config.clone())
        .generate(manifest)
        .unwrap()
        .into_iter()
        .map(|file| (file.path.to_string(), file.content))
        .collect()
}

#[test]
fn always_emits_config_and_rules_index() {
    let files = generate(&manifest(json!({})));

    let paths: Vec<&str> = files.iter().map(|(path, _)| path.as_str()).collect();
    assert_eq!(paths, vec!["AGENTS.md", "opencode.json"]);

    let config: Value = serde_json::from_str(&files[1].1).unwrap();
    assert_eq!(
        config,
        json!({
            "$comment": "agent-scaffold:generated (do not edit; run `agent-scaffold sync`)",
            "$schema": "https://opencode.ai/config.json",
            "instructions": [".agents/instructions/**/*.md"]
        })
    );
    assert!(files[0].1.contains("No instructions are declared yet."));
}

#[test]
fn config_references_canonical_files() {
    let manifest = manifest(json!({
        "commands": [{
            "id": "release",
            "canonicalFile": ".agents/commands/release.md",
            "description": "Cut a release",
            "userInput": "required"
        }, {
            "id": "lint",
            "canonicalFile": ".agents/commands/lint.md"
        }],
        "agents": [{
            "id": "reviewer",
            "description": "Reviews code",
            "promptFile": ".agents/agents/reviewer.md",
            "targets": {"opencode": {"mode": "subagent", "model": "anthropic/claude-sonnet", "temperature": 0.1}}
        }]
    }));

    let files = generate(&manifest);
    let content = &files[1].1;
    assert!(content.starts_with("{\n  \"$comment\": \"agent-scaffold:generated"));
    assert!(content.ends_with("}\n"));

    let config: Value = serde_json::from_str(content).unwrap();
    assert_eq!(
        config["command"],
        json!({
            "lint": {"description": "", "template": {"file": "./.agents/commands/lint.md"}},
            "release": {
                "description": "Cut a release",
                "template": {"file": "./.agents/commands/release.md"},
                "userInput": "required"
            }
        })
    );
    assert_eq!(
        config["agent"]["reviewer"],
        json!({
            "description": "Reviews code",
            "prompt": {"file": "./.agents/agents/reviewer.md"},
            "mode": "subagent",
            "model": "anthropic/claude-sonnet",
            "temperature": 0.1
        })
    );
}

#[test]
fn disabled_artifacts_are_left_out() {
    let manifest = manifest(json!({
        "agents": [{
            "id": "reviewer",
            "description": "Reviews code",
            "promptFile": ".agents/agents/reviewer.md",
            "targets": {"opencode": {"enabled": false}}
        }]
    }));

    let config: Value = serde_json::from_str(&generate(&manifest)[1].1).unwrap();
    assert!(config.get("agent").is_none());
}

#[test]
fn renamed_entries_that_collide_fail() {
    let manifest = manifest(json!({
        "agents": [
            {"id": "a", "description": "a", "promptFile": ".agents/agents/a.md",
             "targets": {"opencode": {"name": "shared"}}},
            {"id": "b", "description": "b", "promptFile": ".agents/agents/b.md",
             "targets": {"opencode": {"name": "shared"}}}
        ]
    }));
    let TargetConfig::OpenCode(config) = &manifest.target("opencode").unwrap().config else {
        unreachable!()
    };

    let err = OpenCodeGenerator::new("opencode", config.clone())
        .generate(&manifest)
        .unwrap_err();
    assert!(err.to_string().contains("shared"));
}

#[test]
fn rules_index_lists_instructions_by_id() {
    let manifest = manifest(json!({
        "instructions": [
            {"id": "typescript-rules", "scope": "path", "applyTo": "**/*.ts",
             "canonicalFile": ".agents/instructions/typescript-rules.md"},
            {"id": "coding-standards", "scope": "repo",
             "canonicalFile": ".agents/instructions/coding-standards.md"},
            {"id": "legacy", "scope": "repo",
             "canonicalFile": ".agents/instructions/legacy.md",
             "targets": {"opencode": {"enabled": false}}}
        ]
    }));

    let files = generate(&manifest);
    insta::assert_snapshot!(files[0].1, @r"
    <!-- agent-scaffold:generated (do not edit; run `agent-scaffold sync`) -->

    # Agent rules

    Read and follow the canonical instructions listed below.

    - [coding-standards](.agents/instructions/coding-standards.md)
    - [typescript-rules](.agents/instructions/typescript-rules.md) (applies to `**/*.ts`)
    ");
}
