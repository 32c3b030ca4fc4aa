//! Validated manifest model
//!
//! Values of these types only come out of [`Manifest::from_document`], so the
//! engine can rely on the invariants checked there: supported schema version,
//! kebab-case identifiers unique within each kind, contained relative paths,
//! and overrides that name declared targets and match their target's kind.

use std::collections::BTreeMap;
use std::fmt;

use scaffold_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

/// Target implementation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[serde(rename = "opencode")]
    OpenCode,
    Copilot,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenCode => "opencode",
            Self::Copilot => "copilot",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifact kinds, declared in output precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Prompt,
    Command,
    Agent,
    Instruction,
    Skill,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        Self::Prompt,
        Self::Command,
        Self::Agent,
        Self::Instruction,
        Self::Skill,
    ];

    /// Singular label (`agent`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Command => "command",
            Self::Agent => "agent",
            Self::Instruction => "instruction",
            Self::Skill => "skill",
        }
    }

    /// Key of this kind's list under `artifacts` (`agents`).
    pub fn section(&self) -> &'static str {
        match self {
            Self::Prompt => "prompts",
            Self::Command => "commands",
            Self::Agent => "agents",
            Self::Instruction => "instructions",
            Self::Skill => "skills",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionScope {
    Repo,
    Path,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserInput {
    Required,
    #[default]
    Optional,
    None,
}

impl UserInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::None => "none",
        }
    }
}

/// Which Copilot surface a target feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopilotSurface {
    Vscode,
    Cli,
}

/// How a pointer file references its canonical file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StubMode {
    /// Pointer sentence plus a relative Markdown link.
    #[default]
    Link,
    /// Pointer sentence only.
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    Primary,
    Subagent,
    All,
}

impl AgentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Subagent => "subagent",
            Self::All => "all",
        }
    }
}

/// The validated manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub schema_version: u32,
    pub project: ProjectConfig,
    pub paths: PathsConfig,
    /// Targets in declaration order
    pub targets: Vec<Target>,
    pub artifacts: Artifacts,
}

impl Manifest {
    /// Look up a declared target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Names of all declared targets, in declaration order.
    pub fn target_names(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.name.as_str()).collect()
    }

    /// Enabled targets, in declaration order.
    pub fn enabled_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.enabled)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub description: String,
    pub default_targets: Vec<String>,
}

/// Canonical directories per artifact kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PathsConfig {
    pub prompts_dir: NormalizedPath,
    pub commands_dir: NormalizedPath,
    pub agents_dir: NormalizedPath,
    pub instructions_dir: NormalizedPath,
    pub skills_dir: NormalizedPath,
}

impl PathsConfig {
    pub fn dir_for(&self, kind: ArtifactKind) -> &NormalizedPath {
        match kind {
            ArtifactKind::Prompt => &self.prompts_dir,
            ArtifactKind::Command => &self.commands_dir,
            ArtifactKind::Agent => &self.agents_dir,
            ArtifactKind::Instruction => &self.instructions_dir,
            ArtifactKind::Skill => &self.skills_dir,
        }
    }
}

/// A declared consumer target.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub enabled: bool,
    pub config: TargetConfig,
}

impl Target {
    pub fn kind(&self) -> TargetKind {
        match self.config {
            TargetConfig::OpenCode(_) => TargetKind::OpenCode,
            TargetConfig::Copilot(_) => TargetKind::Copilot,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetConfig {
    OpenCode(OpenCodeTarget),
    Copilot(CopilotTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenCodeTarget {
    pub config_file: NormalizedPath,
    pub rules_index_file: NormalizedPath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CopilotTarget {
    pub surface: CopilotSurface,
    pub prompts_dir: Option<NormalizedPath>,
    pub agents_dir: NormalizedPath,
    pub instructions_dir: NormalizedPath,
    pub repo_instructions_file: NormalizedPath,
    pub skills_dir: NormalizedPath,
}

impl CopilotTarget {
    /// Output directory for prompt files, if this target emits prompts.
    ///
    /// The CLI surface never does, even when a `promptsDir` is configured.
    pub fn prompt_output_dir(&self) -> Option<&NormalizedPath> {
        match self.surface {
            CopilotSurface::Vscode => self.prompts_dir.as_ref(),
            CopilotSurface::Cli => None,
        }
    }
}

/// OpenCode-specific per-artifact settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpenCodeOverride {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub name: Option<String>,
    pub mode: Option<AgentMode>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub permission: Option<String>,
    pub hidden: Option<bool>,
    pub steps: Option<u32>,
}

/// Copilot-specific per-artifact settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CopilotOverride {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub frontmatter: serde_json::Map<String, serde_json::Value>,
    pub out_file: Option<NormalizedPath>,
    #[serde(default)]
    pub stub_mode: StubMode,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetOverride {
    OpenCode(OpenCodeOverride),
    Copilot(CopilotOverride),
}

impl TargetOverride {
    pub fn enabled(&self) -> bool {
        match self {
            Self::OpenCode(o) => o.enabled,
            Self::Copilot(o) => o.enabled,
        }
    }
}

/// Per-target overrides of one artifact, keyed by target name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides(BTreeMap<String, TargetOverride>);

impl Overrides {
    pub fn new(entries: BTreeMap<String, TargetOverride>) -> Self {
        Self(entries)
    }

    pub fn get(&self, target: &str) -> Option<&TargetOverride> {
        self.0.get(target)
    }

    /// Artifacts are enabled for every target unless an override says otherwise.
    pub fn is_enabled(&self, target: &str) -> bool {
        self.get(target).is_none_or(TargetOverride::enabled)
    }

    pub fn opencode(&self, target: &str) -> Option<&OpenCodeOverride> {
        match self.get(target) {
            Some(TargetOverride::OpenCode(o)) => Some(o),
            _ => None,
        }
    }

    pub fn copilot(&self, target: &str) -> Option<&CopilotOverride> {
        match self.get(target) {
            Some(TargetOverride::Copilot(o)) => Some(o),
            _ => None,
        }
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub canonical_file: NormalizedPath,
    pub description: Option<String>,
    pub default_agent: Option<String>,
    pub default_model: Option<String>,
    pub tools: Vec<String>,
    pub overrides: Overrides,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: String,
    pub canonical_file: NormalizedPath,
    pub description: String,
    pub user_input: UserInput,
    pub overrides: Overrides,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: String,
    pub description: String,
    pub prompt_file: NormalizedPath,
    pub overrides: Overrides,
}

/// Where an instruction applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Repo,
    Path { apply_to: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub id: String,
    pub scope: Scope,
    pub canonical_file: NormalizedPath,
    pub overrides: Overrides,
}

impl Instruction {
    pub fn apply_to(&self) -> Option<&str> {
        match &self.scope {
            Scope::Repo => None,
            Scope::Path { apply_to } => Some(apply_to),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: String,
    pub canonical_dir: NormalizedPath,
    pub skill_file: NormalizedPath,
    pub name: Option<String>,
    pub description: Option<String>,
    pub assets: Vec<NormalizedPath>,
    pub overrides: Overrides,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artifacts {
    pub prompts: Vec<Prompt>,
    pub commands: Vec<Command>,
    pub agents: Vec<Agent>,
    pub instructions: Vec<Instruction>,
    pub skills: Vec<Skill>,
}

impl Artifacts {
    /// Every artifact, grouped by kind in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = ArtifactRef<'_>> {
        self.prompts
            .iter()
            .map(ArtifactRef::Prompt)
            .chain(self.commands.iter().map(ArtifactRef::Command))
            .chain(self.agents.iter().map(ArtifactRef::Agent))
            .chain(self.instructions.iter().map(ArtifactRef::Instruction))
            .chain(self.skills.iter().map(ArtifactRef::Skill))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Borrowed view over an artifact of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArtifactRef<'a> {
    Prompt(&'a Prompt),
    Command(&'a Command),
    Agent(&'a Agent),
    Instruction(&'a Instruction),
    Skill(&'a Skill),
}

impl<'a> ArtifactRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Self::Prompt(a) => &a.id,
            Self::Command(a) => &a.id,
            Self::Agent(a) => &a.id,
            Self::Instruction(a) => &a.id,
            Self::Skill(a) => &a.id,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Prompt(_) => ArtifactKind::Prompt,
            Self::Command(_) => ArtifactKind::Command,
            Self::Agent(_) => ArtifactKind::Agent,
            Self::Instruction(_) => ArtifactKind::Instruction,
            Self::Skill(_) => ArtifactKind::Skill,
        }
    }

    pub fn overrides(&self) -> &'a Overrides {
        match self {
            Self::Prompt(a) => &a.overrides,
            Self::Command(a) => &a.overrides,
            Self::Agent(a) => &a.overrides,
            Self::Instruction(a) => &a.overrides,
            Self::Skill(a) => &a.overrides,
        }
    }

    pub fn is_enabled_for(&self, target: &str) -> bool {
        self.overrides().is_enabled(target)
    }
}
