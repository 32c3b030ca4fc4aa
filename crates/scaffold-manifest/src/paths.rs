//! Canonical and generated path resolution
//!
//! Pure functions over the validated model; nothing here touches the disk.
//! Generators and the doctor both go through these so every consumer agrees
//! on where an artifact lives and where its bridge files land.

use scaffold_fs::NormalizedPath;

use crate::model::{ArtifactRef, CopilotTarget, OpenCodeTarget, Scope, Target, TargetConfig};

impl<'a> ArtifactRef<'a> {
    /// The canonical file (or, for skills, directory) of this artifact.
    pub fn canonical_path(&self) -> &'a NormalizedPath {
        canonical_path(*self)
    }
}

/// The canonical file (or, for skills, directory) of an artifact.
pub fn canonical_path(artifact: ArtifactRef<'_>) -> &NormalizedPath {
    match artifact {
        ArtifactRef::Prompt(p) => &p.canonical_file,
        ArtifactRef::Command(c) => &c.canonical_file,
        ArtifactRef::Agent(a) => &a.prompt_file,
        ArtifactRef::Instruction(i) => &i.canonical_file,
        ArtifactRef::Skill(s) => &s.canonical_dir,
    }
}

/// Every path `target` generates on behalf of `artifact`, in ascending order.
///
/// Empty when the target is disabled, the artifact is disabled for it, or
/// the target has no representation for the artifact's kind. Shared outputs
/// such as the OpenCode config file are included for each contributing
/// artifact.
pub fn generated_paths(artifact: ArtifactRef<'_>, target: &Target) -> Vec<NormalizedPath> {
    if !target.enabled || !artifact.is_enabled_for(&target.name) {
        return Vec::new();
    }
    let mut paths = match &target.config {
        TargetConfig::OpenCode(config) => opencode_paths(artifact, config),
        TargetConfig::Copilot(config) => copilot_path(artifact, &target.name, config)
            .into_iter()
            .collect(),
    };
    paths.sort();
    paths.dedup();
    paths
}

fn opencode_paths(artifact: ArtifactRef<'_>, config: &OpenCodeTarget) -> Vec<NormalizedPath> {
    match artifact {
        ArtifactRef::Command(_) | ArtifactRef::Agent(_) => vec![config.config_file.clone()],
        ArtifactRef::Instruction(_) => {
            vec![config.config_file.clone(), config.rules_index_file.clone()]
        }
        ArtifactRef::Prompt(_) | ArtifactRef::Skill(_) => Vec::new(),
    }
}

/// Output path of a Copilot bridge file for `artifact`, if the target emits one.
///
/// Repo-scope instructions all map to the single repository instructions
/// file. An `outFile` override replaces the file name of per-artifact outputs.
pub fn copilot_path(
    artifact: ArtifactRef<'_>,
    target_name: &str,
    config: &CopilotTarget,
) -> Option<NormalizedPath> {
    let out_file = artifact
        .overrides()
        .copilot(target_name)
        .and_then(|o| o.out_file.as_ref())
        .map(NormalizedPath::as_str);
    let id = artifact.id();

    match artifact {
        ArtifactRef::Prompt(_) => {
            let dir = config.prompt_output_dir()?;
            Some(dir.join(out_file.unwrap_or(&format!("{id}.prompt.md"))))
        }
        ArtifactRef::Agent(_) => Some(
            config
                .agents_dir
                .join(out_file.unwrap_or(&format!("{id}.agent.md"))),
        ),
        ArtifactRef::Instruction(instruction) => match instruction.scope {
            Scope::Repo => Some(config.repo_instructions_file.clone()),
            Scope::Path { .. } => Some(
                config
                    .instructions_dir
                    .join(out_file.unwrap_or(&format!("{id}.instructions.md"))),
            ),
        },
        ArtifactRef::Skill(_) => Some(
            config
                .skills_dir
                .join(id)
                .join(out_file.unwrap_or("SKILL.md")),
        ),
        ArtifactRef::Command(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CopilotOverride, CopilotSurface, Instruction, Overrides, Prompt, StubMode, TargetOverride,
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn copilot_target(name: &str, prompts: bool) -> Target {
        Target {
            name: name.to_string(),
            enabled: true,
            config: TargetConfig::Copilot(CopilotTarget {
                surface: if prompts {
                    CopilotSurface::Vscode
                } else {
                    CopilotSurface::Cli
                },
                prompts_dir: prompts.then(|| NormalizedPath::new(".github/prompts")),
                agents_dir: NormalizedPath::new(".github/agents"),
                instructions_dir: NormalizedPath::new(".github/instructions"),
                repo_instructions_file: NormalizedPath::new(".github/copilot-instructions.md"),
                skills_dir: NormalizedPath::new(".github/skills"),
            }),
        }
    }

    fn opencode_target() -> Target {
        Target {
            name: "opencode".to_string(),
            enabled: true,
            config: TargetConfig::OpenCode(OpenCodeTarget {
                config_file: NormalizedPath::new("opencode.json"),
                rules_index_file: NormalizedPath::new("AGENTS.md"),
            }),
        }
    }

    fn prompt(overrides: Overrides) -> Prompt {
        Prompt {
            id: "review-pr".to_string(),
            title: "Review PR".to_string(),
            canonical_file: NormalizedPath::new(".agents/prompts/review-pr.md"),
            description: None,
            default_agent: None,
            default_model: None,
            tools: Vec::new(),
            overrides,
        }
    }

    fn instruction(scope: Scope) -> Instruction {
        Instruction {
            id: "typescript-rules".to_string(),
            scope,
            canonical_file: NormalizedPath::new(".agents/instructions/typescript-rules.md"),
            overrides: Overrides::default(),
        }
    }

    #[test]
    fn prompts_only_for_vscode_surface() {
        let prompt = prompt(Overrides::default());
        let artifact = ArtifactRef::Prompt(&prompt);
        assert_eq!(
            generated_paths(artifact, &copilot_target("copilot-vscode", true)),
            vec![NormalizedPath::new(".github/prompts/review-pr.prompt.md")]
        );
        assert!(generated_paths(artifact, &copilot_target("copilot-cli", false)).is_empty());
        assert!(generated_paths(artifact, &opencode_target()).is_empty());
    }

    #[test]
    fn path_instruction_gets_own_file() {
        let instruction = instruction(Scope::Path {
            apply_to: "**/*.ts".to_string(),
        });
        assert_eq!(
            generated_paths(
                ArtifactRef::Instruction(&instruction),
                &copilot_target("copilot-vscode", true)
            ),
            vec![NormalizedPath::new(
                ".github/instructions/typescript-rules.instructions.md"
            )]
        );
    }

    #[test]
    fn repo_instruction_merges_into_repo_file() {
        let instruction = instruction(Scope::Repo);
        assert_eq!(
            generated_paths(
                ArtifactRef::Instruction(&instruction),
                &copilot_target("copilot-cli", false)
            ),
            vec![NormalizedPath::new(".github/copilot-instructions.md")]
        );
    }

    #[test]
    fn opencode_instruction_touches_config_and_index() {
        let instruction = instruction(Scope::Repo);
        assert_eq!(
            generated_paths(ArtifactRef::Instruction(&instruction), &opencode_target()),
            vec![
                NormalizedPath::new("AGENTS.md"),
                NormalizedPath::new("opencode.json")
            ]
        );
    }

    #[test]
    fn out_file_replaces_file_name() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "copilot-vscode".to_string(),
            TargetOverride::Copilot(CopilotOverride {
                enabled: true,
                frontmatter: serde_json::Map::new(),
                out_file: Some(NormalizedPath::new("review.prompt.md")),
                stub_mode: StubMode::Link,
            }),
        );
        let prompt = prompt(Overrides::new(entries));
        assert_eq!(
            generated_paths(
                ArtifactRef::Prompt(&prompt),
                &copilot_target("copilot-vscode", true)
            ),
            vec![NormalizedPath::new(".github/prompts/review.prompt.md")]
        );
    }

    #[test]
    fn disabled_target_generates_nothing() {
        let mut target = opencode_target();
        target.enabled = false;
        let instruction = instruction(Scope::Repo);
        assert!(generated_paths(ArtifactRef::Instruction(&instruction), &target).is_empty());
    }
}
