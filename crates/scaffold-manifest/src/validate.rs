//! Document-to-model validation
//!
//! [`Manifest::from_document`] is the only way to build a [`Manifest`]. It
//! stops at the first problem and names the artifact or target responsible.

use std::collections::{BTreeMap, HashSet};

use scaffold_fs::NormalizedPath;

use crate::document::{
    AgentDocument, CommandDocument, InstructionDocument, ManifestDocument, OverrideTable,
    PromptDocument, SkillDocument, TargetDocument, TargetTable,
};
use crate::id::{is_frontmatter_key, is_kebab_case};
use crate::model::{
    Agent, ArtifactKind, Artifacts, Command, CopilotOverride, CopilotSurface, CopilotTarget,
    Instruction, InstructionScope, Manifest, OpenCodeOverride, OpenCodeTarget, Overrides,
    PathsConfig, ProjectConfig, Prompt, Scope, Skill, Target, TargetConfig, TargetKind,
    TargetOverride,
};
use crate::{Error, Result, SUPPORTED_SCHEMA_VERSION};

impl Manifest {
    /// Validate a parsed document into a [`Manifest`].
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedVersion`] when `schemaVersion` is not supported
    /// - [`Error::Schema`] for unsafe paths, bad override tables, or a
    ///   path-scope instruction without `applyTo`
    /// - [`Error::Reference`] when a default target or an override names an
    ///   undeclared target
    /// - [`Error::InvalidId`] / [`Error::DuplicateId`] for identifier problems
    pub fn from_document(document: ManifestDocument) -> Result<Self> {
        if document.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(Error::UnsupportedVersion {
                found: document.schema_version,
                supported: SUPPORTED_SCHEMA_VERSION,
            });
        }

        let paths = PathsConfig {
            prompts_dir: contained(document.paths.prompts_dir, "paths.promptsDir")?,
            commands_dir: contained(document.paths.commands_dir, "paths.commandsDir")?,
            agents_dir: contained(document.paths.agents_dir, "paths.agentsDir")?,
            instructions_dir: contained(document.paths.instructions_dir, "paths.instructionsDir")?,
            skills_dir: contained(document.paths.skills_dir, "paths.skillsDir")?,
        };

        let targets = validate_targets(&document.targets)?;

        for (index, name) in document.project.default_targets.iter().enumerate() {
            if document.targets.get(name).is_none() {
                return Err(Error::Reference {
                    location: format!("project.defaultTargets[{index}]"),
                    target: name.clone(),
                });
            }
        }

        let resolver = OverrideResolver { targets: &targets };
        let source = document.artifacts;
        let artifacts = Artifacts {
            prompts: unique(source.prompts, ArtifactKind::Prompt, |p| &p.id)?
                .into_iter()
                .map(|p| prompt(p, &resolver))
                .collect::<Result<_>>()?,
            commands: unique(source.commands, ArtifactKind::Command, |c| &c.id)?
                .into_iter()
                .map(|c| command(c, &resolver))
                .collect::<Result<_>>()?,
            agents: unique(source.agents, ArtifactKind::Agent, |a| &a.id)?
                .into_iter()
                .map(|a| agent(a, &resolver))
                .collect::<Result<_>>()?,
            instructions: unique(source.instructions, ArtifactKind::Instruction, |i| &i.id)?
                .into_iter()
                .map(|i| instruction(i, &resolver))
                .collect::<Result<_>>()?,
            skills: unique(source.skills, ArtifactKind::Skill, |s| &s.id)?
                .into_iter()
                .map(|s| skill(s, &resolver))
                .collect::<Result<_>>()?,
        };

        Ok(Self {
            schema_version: document.schema_version,
            project: ProjectConfig {
                name: document.project.name,
                description: document.project.description,
                default_targets: document.project.default_targets,
            },
            paths,
            targets,
            artifacts,
        })
    }
}

fn contained(path: NormalizedPath, location: &str) -> Result<NormalizedPath> {
    path.contained().map_err(|_| {
        Error::schema(location, "path must be relative and stay inside the repository")
    })
}

fn validate_targets(table: &TargetTable) -> Result<Vec<Target>> {
    table
        .iter()
        .map(|(name, document)| {
            let location = |field: &str| format!("targets.{name}.{field}");
            let (enabled, config) = match document {
                TargetDocument::OpenCode(doc) => (
                    doc.enabled,
                    TargetConfig::OpenCode(OpenCodeTarget {
                        config_file: contained(doc.config_file.clone(), &location("configFile"))?,
                        rules_index_file: contained(
                            doc.rules_index_file.clone(),
                            &location("rulesIndexFile"),
                        )?,
                    }),
                ),
                TargetDocument::Copilot(doc) => {
                    let prompts_dir = doc
                        .prompts_dir
                        .clone()
                        .map(|dir| contained(dir, &location("promptsDir")))
                        .transpose()?;
                    let surface = doc.surface.unwrap_or(if prompts_dir.is_some() {
                        CopilotSurface::Vscode
                    } else {
                        CopilotSurface::Cli
                    });
                    (
                        doc.enabled,
                        TargetConfig::Copilot(CopilotTarget {
                            surface,
                            prompts_dir,
                            agents_dir: contained(doc.agents_dir.clone(), &location("agentsDir"))?,
                            instructions_dir: contained(
                                doc.instructions_dir.clone(),
                                &location("instructionsDir"),
                            )?,
                            repo_instructions_file: contained(
                                doc.repo_instructions_file.clone(),
                                &location("repoInstructionsFile"),
                            )?,
                            skills_dir: contained(doc.skills_dir.clone(), &location("skillsDir"))?,
                        }),
                    )
                }
            };
            Ok(Target {
                name: name.clone(),
                enabled,
                config,
            })
        })
        .collect()
}

/// Check identifiers of one kind, returning the entries unchanged.
fn unique<T>(entries: Vec<T>, kind: ArtifactKind, id_of: impl Fn(&T) -> &String) -> Result<Vec<T>> {
    let mut seen = HashSet::new();
    for entry in &entries {
        let id = id_of(entry);
        if !is_kebab_case(id) {
            return Err(Error::InvalidId {
                kind,
                id: id.clone(),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(Error::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(entries)
}

fn artifact_location(kind: ArtifactKind, id: &str, field: &str) -> String {
    format!("artifacts.{}[{id}].{field}", kind.section())
}

fn artifact_path(path: NormalizedPath, kind: ArtifactKind, id: &str, field: &str) -> Result<NormalizedPath> {
    contained(path, &artifact_location(kind, id, field))
}

/// Types raw override tables against the declared targets.
struct OverrideResolver<'a> {
    targets: &'a [Target],
}

impl OverrideResolver<'_> {
    fn resolve(&self, table: OverrideTable, kind: ArtifactKind, id: &str) -> Result<Overrides> {
        let mut resolved = BTreeMap::new();
        for (target_name, value) in table {
            let location = artifact_location(kind, id, &format!("targets.{target_name}"));
            let target = self
                .targets
                .iter()
                .find(|t| t.name == target_name)
                .ok_or_else(|| Error::Reference {
                    location: location.clone(),
                    target: target_name.clone(),
                })?;

            let entry = match target.kind() {
                TargetKind::OpenCode => TargetOverride::OpenCode(
                    serde_json::from_value::<OpenCodeOverride>(value)
                        .map_err(|e| Error::schema(&location, e.to_string()))?,
                ),
                TargetKind::Copilot => {
                    let copilot = serde_json::from_value::<CopilotOverride>(value)
                        .map_err(|e| Error::schema(&location, e.to_string()))?;
                    if let Some(out_file) = &copilot.out_file
                        && (!out_file.is_contained() || out_file.as_str().contains('/'))
                    {
                        return Err(Error::schema(
                            format!("{location}.outFile"),
                            "outFile must be a plain file name",
                        ));
                    }
                    if let Some(key) = copilot.frontmatter.keys().find(|k| !is_frontmatter_key(k)) {
                        return Err(Error::schema(
                            format!("{location}.frontmatter"),
                            format!("invalid frontmatter key {key:?}"),
                        ));
                    }
                    TargetOverride::Copilot(copilot)
                }
            };
            resolved.insert(target_name, entry);
        }
        Ok(Overrides::new(resolved))
    }
}

fn prompt(doc: PromptDocument, resolver: &OverrideResolver<'_>) -> Result<Prompt> {
    let kind = ArtifactKind::Prompt;
    Ok(Prompt {
        canonical_file: artifact_path(doc.canonical_file, kind, &doc.id, "canonicalFile")?,
        overrides: resolver.resolve(doc.targets, kind, &doc.id)?,
        id: doc.id,
        title: doc.title,
        description: doc.description,
        default_agent: doc.default_agent,
        default_model: doc.default_model,
        tools: doc.tools,
    })
}

fn command(doc: CommandDocument, resolver: &OverrideResolver<'_>) -> Result<Command> {
    let kind = ArtifactKind::Command;
    Ok(Command {
        canonical_file: artifact_path(doc.canonical_file, kind, &doc.id, "canonicalFile")?,
        overrides: resolver.resolve(doc.targets, kind, &doc.id)?,
        id: doc.id,
        description: doc.description,
        user_input: doc.user_input,
    })
}

fn agent(doc: AgentDocument, resolver: &OverrideResolver<'_>) -> Result<Agent> {
    let kind = ArtifactKind::Agent;
    Ok(Agent {
        prompt_file: artifact_path(doc.prompt_file, kind, &doc.id, "promptFile")?,
        overrides: resolver.resolve(doc.targets, kind, &doc.id)?,
        id: doc.id,
        description: doc.description,
    })
}

fn instruction(doc: InstructionDocument, resolver: &OverrideResolver<'_>) -> Result<Instruction> {
    let kind = ArtifactKind::Instruction;
    let scope = match doc.scope {
        InstructionScope::Repo => Scope::Repo,
        InstructionScope::Path => match doc.apply_to.as_deref().map(str::trim) {
            Some(glob) if !glob.is_empty() => Scope::Path {
                apply_to: glob.to_string(),
            },
            _ => {
                return Err(Error::schema(
                    artifact_location(kind, &doc.id, "applyTo"),
                    "path-scoped instructions require a non-empty applyTo glob",
                ));
            }
        },
    };
    Ok(Instruction {
        canonical_file: artifact_path(doc.canonical_file, kind, &doc.id, "canonicalFile")?,
        overrides: resolver.resolve(doc.targets, kind, &doc.id)?,
        id: doc.id,
        scope,
    })
}

fn skill(doc: SkillDocument, resolver: &OverrideResolver<'_>) -> Result<Skill> {
    let kind = ArtifactKind::Skill;
    let canonical_dir = artifact_path(doc.canonical_dir, kind, &doc.id, "canonicalDir")?;
    let skill_file = match doc.skill_file {
        Some(file) => artifact_path(file, kind, &doc.id, "skillFile")?,
        None => canonical_dir.join("SKILL.md"),
    };
    let assets = doc
        .assets
        .into_iter()
        .map(|asset| artifact_path(asset, kind, &doc.id, "assets"))
        .collect::<Result<_>>()?;
    Ok(Skill {
        overrides: resolver.resolve(doc.targets, kind, &doc.id)?,
        id: doc.id,
        canonical_dir,
        skill_file,
        name: doc.name,
        description: doc.description,
        assets,
    })
}
