//! Serde shape of the manifest file
//!
//! Parsing is strict: every struct rejects unknown keys, and required fields
//! have no defaults. Values are not validated here beyond their types; see
//! [`crate::validate`] for the semantic checks.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use scaffold_fs::NormalizedPath;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SUPPORTED_SCHEMA_VERSION;
use crate::model::{ArtifactKind, CopilotSurface, InstructionScope, UserInput};

/// Per-target override table of one artifact, as written in the file.
///
/// Values stay untyped until the referenced target's kind is known.
pub type OverrideTable = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestDocument {
    pub schema_version: u32,
    pub project: ProjectDocument,
    #[serde(default)]
    pub paths: PathsDocument,
    #[serde(default)]
    pub targets: TargetTable,
    #[serde(default)]
    pub artifacts: ArtifactsDocument,
}

impl ManifestDocument {
    /// Manifest written by `agent-scaffold init`.
    ///
    /// Declares one OpenCode target and the two Copilot surfaces, all enabled,
    /// with no artifacts.
    pub fn starter(name: &str) -> Self {
        let copilot = |prompts_dir: Option<&str>| CopilotTargetDocument {
            enabled: true,
            surface: None,
            prompts_dir: prompts_dir.map(NormalizedPath::new),
            agents_dir: default_copilot_agents_dir(),
            instructions_dir: default_copilot_instructions_dir(),
            repo_instructions_file: default_repo_instructions_file(),
            skills_dir: default_copilot_skills_dir(),
        };

        let targets = TargetTable(vec![
            (
                "opencode".to_string(),
                TargetDocument::OpenCode(OpenCodeTargetDocument {
                    enabled: true,
                    config_file: default_opencode_config_file(),
                    rules_index_file: default_rules_index_file(),
                }),
            ),
            (
                "copilot-vscode".to_string(),
                TargetDocument::Copilot(copilot(Some(".github/prompts"))),
            ),
            ("copilot-cli".to_string(), TargetDocument::Copilot(copilot(None))),
        ]);

        Self {
            schema_version: SUPPORTED_SCHEMA_VERSION,
            project: ProjectDocument {
                name: name.to_string(),
                description: String::new(),
                default_targets: targets.names().map(str::to_string).collect(),
            },
            paths: PathsDocument::default(),
            targets,
            artifacts: ArtifactsDocument::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub default_targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PathsDocument {
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: NormalizedPath,
    #[serde(default = "default_commands_dir")]
    pub commands_dir: NormalizedPath,
    #[serde(default = "default_agents_dir")]
    pub agents_dir: NormalizedPath,
    #[serde(default = "default_instructions_dir")]
    pub instructions_dir: NormalizedPath,
    #[serde(default = "default_skills_dir")]
    pub skills_dir: NormalizedPath,
}

impl Default for PathsDocument {
    fn default() -> Self {
        Self {
            prompts_dir: default_prompts_dir(),
            commands_dir: default_commands_dir(),
            agents_dir: default_agents_dir(),
            instructions_dir: default_instructions_dir(),
            skills_dir: default_skills_dir(),
        }
    }
}

fn default_prompts_dir() -> NormalizedPath {
    NormalizedPath::new(".agents/prompts")
}

fn default_commands_dir() -> NormalizedPath {
    NormalizedPath::new(".agents/commands")
}

fn default_agents_dir() -> NormalizedPath {
    NormalizedPath::new(".agents/agents")
}

fn default_instructions_dir() -> NormalizedPath {
    NormalizedPath::new(".agents/instructions")
}

fn default_skills_dir() -> NormalizedPath {
    NormalizedPath::new(".agents/skills")
}

/// One target entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TargetDocument {
    #[serde(rename = "opencode")]
    OpenCode(OpenCodeTargetDocument),
    Copilot(CopilotTargetDocument),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpenCodeTargetDocument {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_opencode_config_file")]
    pub config_file: NormalizedPath,
    #[serde(default = "default_rules_index_file")]
    pub rules_index_file: NormalizedPath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CopilotTargetDocument {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<CopilotSurface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts_dir: Option<NormalizedPath>,
    #[serde(default = "default_copilot_agents_dir")]
    pub agents_dir: NormalizedPath,
    #[serde(default = "default_copilot_instructions_dir")]
    pub instructions_dir: NormalizedPath,
    #[serde(default = "default_repo_instructions_file")]
    pub repo_instructions_file: NormalizedPath,
    #[serde(default = "default_copilot_skills_dir")]
    pub skills_dir: NormalizedPath,
}

fn default_true() -> bool {
    true
}

fn default_opencode_config_file() -> NormalizedPath {
    NormalizedPath::new("opencode.json")
}

fn default_rules_index_file() -> NormalizedPath {
    NormalizedPath::new("AGENTS.md")
}

fn default_copilot_agents_dir() -> NormalizedPath {
    NormalizedPath::new(".github/agents")
}

fn default_copilot_instructions_dir() -> NormalizedPath {
    NormalizedPath::new(".github/instructions")
}

fn default_repo_instructions_file() -> NormalizedPath {
    NormalizedPath::new(".github/copilot-instructions.md")
}

fn default_copilot_skills_dir() -> NormalizedPath {
    NormalizedPath::new(".github/skills")
}

/// Target entries keyed by name, in the order the file declares them.
///
/// Declaration order drives generation order, so a plain map is not enough.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetTable(pub Vec<(String, TargetDocument)>);

impl TargetTable {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&TargetDocument> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, target)| target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, TargetDocument)> {
        self.0.iter()
    }
}

impl Serialize for TargetTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, target) in &self.0 {
            map.serialize_entry(name, target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TargetTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = TargetTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of target name to target configuration")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<TargetTable, A::Error> {
                let mut seen = HashSet::new();
                let mut entries = Vec::new();
                while let Some((name, target)) = access.next_entry::<String, TargetDocument>()? {
                    if !seen.insert(name.clone()) {
                        return Err(serde::de::Error::custom(format!("duplicate target '{name}'")));
                    }
                    entries.push((name, target));
                }
                Ok(TargetTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactsDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<PromptDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<AgentDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<InstructionDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillDocument>,
}

/// Kind-independent view of one declared artifact, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactEntry<'a> {
    pub kind: ArtifactKind,
    pub id: &'a str,
    /// Canonical files and directories the artifact expects on disk
    pub canonical: Vec<NormalizedPath>,
    pub targets: &'a OverrideTable,
    /// `applyTo` glob; `Some` only for path-scope instructions
    pub apply_to: Option<Option<&'a str>>,
}

impl ArtifactsDocument {
    /// Every declared artifact, grouped by kind in precedence order.
    pub fn entries(&self) -> Vec<ArtifactEntry<'_>> {
        let mut entries = Vec::new();
        for p in &self.prompts {
            entries.push(ArtifactEntry {
                kind: ArtifactKind::Prompt,
                id: &p.id,
                canonical: vec![p.canonical_file.clone()],
                targets: &p.targets,
                apply_to: None,
            });
        }
        for c in &self.commands {
            entries.push(ArtifactEntry {
                kind: ArtifactKind::Command,
                id: &c.id,
                canonical: vec![c.canonical_file.clone()],
                targets: &c.targets,
                apply_to: None,
            });
        }
        for a in &self.agents {
            entries.push(ArtifactEntry {
                kind: ArtifactKind::Agent,
                id: &a.id,
                canonical: vec![a.prompt_file.clone()],
                targets: &a.targets,
                apply_to: None,
            });
        }
        for i in &self.instructions {
            entries.push(ArtifactEntry {
                kind: ArtifactKind::Instruction,
                id: &i.id,
                canonical: vec![i.canonical_file.clone()],
                targets: &i.targets,
                apply_to: (i.scope == InstructionScope::Path).then_some(i.apply_to.as_deref()),
            });
        }
        for s in &self.skills {
            let skill_file = s
                .skill_file
                .clone()
                .unwrap_or_else(|| s.canonical_dir.join("SKILL.md"));
            entries.push(ArtifactEntry {
                kind: ArtifactKind::Skill,
                id: &s.id,
                canonical: vec![s.canonical_dir.clone(), skill_file],
                targets: &s.targets,
                apply_to: None,
            });
        }
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PromptDocument {
    pub id: String,
    pub title: String,
    pub canonical_file: NormalizedPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: OverrideTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommandDocument {
    pub id: String,
    pub canonical_file: NormalizedPath,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user_input: UserInput,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: OverrideTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AgentDocument {
    pub id: String,
    pub description: String,
    pub prompt_file: NormalizedPath,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: OverrideTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InstructionDocument {
    pub id: String,
    pub scope: InstructionScope,
    pub canonical_file: NormalizedPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_to: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: OverrideTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SkillDocument {
    pub id: String,
    pub canonical_dir: NormalizedPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_file: Option<NormalizedPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<NormalizedPath>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: OverrideTable,
}
