//! OpenCode generator.
//!
//! Produces exactly two files: the JSON configuration (commands and agents
//! as file references into the canonical tree) and the `AGENTS.md` rules
//! index listing every enabled instruction.

use serde_json::{Map, Value, json};

use scaffold_manifest::{Agent, ArtifactRef, Command, Manifest, OpenCodeTarget, Scope, UserInput};

use crate::error::{Error, Result};
use crate::generator::{Aggregate, Generator, OutputDescriptor, Template, sort_outputs};
use crate::markdown::{BANNER_TEXT, Frontmatter, document_head};

/// JSON schema reference written into the configuration file.
pub const OPENCODE_SCHEMA: &str = "https://opencode.ai/config.json";

pub struct OpenCodeGenerator {
    name: String,
    config: OpenCodeTarget,
}

impl OpenCodeGenerator {
    pub fn new(name: impl Into<String>, config: OpenCodeTarget) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    fn render_error(&self, descriptor: &OutputDescriptor<'_>, message: String) -> Error {
        Error::Render {
            target: self.name.clone(),
            output: descriptor.path.clone(),
            message,
        }
    }

    fn command_entry(&self, command: &Command) -> (String, Value) {
        let overrides = command.overrides.opencode(&self.name);
        let key = overrides
            .and_then(|o| o.name.clone())
            .unwrap_or_else(|| command.id.clone());

        let mut entry = Map::new();
        entry.insert("description".into(), command.description.clone().into());
        entry.insert(
            "template".into(),
            json!({ "file": file_reference(command.canonical_file.as_str()) }),
        );
        if command.user_input != UserInput::Optional {
            entry.insert("userInput".into(), command.user_input.as_str().into());
        }
        (key, Value::Object(entry))
    }

    fn agent_entry(&self, agent: &Agent) -> (String, Value) {
        let overrides = agent.overrides.opencode(&self.name);
        let key = overrides
            .and_then(|o| o.name.clone())
            .unwrap_or_else(|| agent.id.clone());

        let mut entry = Map::new();
        entry.insert("description".into(), agent.description.clone().into());
        entry.insert(
            "prompt".into(),
            json!({ "file": file_reference(agent.prompt_file.as_str()) }),
        );
        if let Some(o) = overrides {
            if let Some(model) = &o.model {
                entry.insert("model".into(), model.clone().into());
            }
            if let Some(mode) = o.mode {
                entry.insert("mode".into(), mode.as_str().into());
            }
            if let Some(temperature) = o.temperature {
                entry.insert("temperature".into(), json!(temperature));
            }
            if let Some(steps) = o.steps {
                entry.insert("steps".into(), steps.into());
            }
            if let Some(permission) = &o.permission {
                entry.insert("permission".into(), permission.clone().into());
            }
            if let Some(hidden) = o.hidden {
                entry.insert("hidden".into(), hidden.into());
            }
        }
        (key, Value::Object(entry))
    }

    fn render_config(&self, descriptor: &OutputDescriptor<'_>, instructions_glob: &str) -> Result<String> {
        let mut commands = Map::new();
        let mut agents = Map::new();

        for artifact in &descriptor.artifacts {
            let (section, (key, entry)) = match artifact {
                ArtifactRef::Command(command) => (&mut commands, self.command_entry(command)),
                ArtifactRef::Agent(agent) => (&mut agents, self.agent_entry(agent)),
                _ => continue,
            };
            if section.insert(key.clone(), entry).is_some() {
                return Err(self.render_error(
                    descriptor,
                    format!("two {}s share the OpenCode name '{key}'", artifact.kind()),
                ));
            }
        }

        let mut config = Map::new();
        config.insert("$comment".into(), BANNER_TEXT.into());
        config.insert("$schema".into(), OPENCODE_SCHEMA.into());
        config.insert("instructions".into(), json!([instructions_glob]));
        if !commands.is_empty() {
            config.insert("command".into(), Value::Object(commands));
        }
        if !agents.is_empty() {
            config.insert("agent".into(), Value::Object(agents));
        }

        let mut rendered = serde_json::to_string_pretty(&Value::Object(config))?;
        rendered.push('\n');
        Ok(rendered)
    }

    fn render_rules_index(&self, descriptor: &OutputDescriptor<'_>) -> Result<String> {
        let mut content = document_head(&Frontmatter::new())?;
        content.push_str("\n# Agent rules\n\n");

        let instructions: Vec<_> = descriptor
            .artifacts
            .iter()
            .filter_map(|artifact| match artifact {
                ArtifactRef::Instruction(instruction) => Some(*instruction),
                _ => None,
            })
            .collect();

        if instructions.is_empty() {
            content.push_str("No instructions are declared yet.\n");
            return Ok(content);
        }

        content.push_str("Read and follow the canonical instructions listed below.\n\n");
        for instruction in instructions {
            let link = instruction.canonical_file.link_from(&descriptor.path);
            match &instruction.scope {
                Scope::Repo => content.push_str(&format!("- [{}]({link})\n", instruction.id)),
                Scope::Path { apply_to } => content.push_str(&format!(
                    "- [{}]({link}) (applies to `{apply_to}`)\n",
                    instruction.id
                )),
            }
        }
        Ok(content)
    }
}

/// Config-relative file reference (`./.agents/commands/release.md`).
fn file_reference(path: &str) -> String {
    format!("./{path}")
}

impl Generator for OpenCodeGenerator {
    fn target(&self) -> &str {
        &self.name
    }

    fn enumerate_outputs<'m>(&self, manifest: &'m Manifest) -> Vec<OutputDescriptor<'m>> {
        let enabled: Vec<ArtifactRef<'m>> = manifest
            .artifacts
            .iter()
            .filter(|artifact| artifact.is_enabled_for(&self.name))
            .collect();

        let config_artifacts = enabled
            .iter()
            .copied()
            .filter(|a| {
                matches!(
                    a,
                    ArtifactRef::Command(_) | ArtifactRef::Agent(_) | ArtifactRef::Instruction(_)
                )
            })
            .collect();
        let instructions = enabled
            .iter()
            .copied()
            .filter(|a| matches!(a, ArtifactRef::Instruction(_)))
            .collect();

        let instructions_glob = format!("{}/**/*.md", manifest.paths.instructions_dir);
        let mut outputs = vec![
            OutputDescriptor::aggregate(
                self.config.rules_index_file.clone(),
                Aggregate::RulesIndex,
                instructions,
                Template::RulesIndex,
            ),
            OutputDescriptor::aggregate(
                self.config.config_file.clone(),
                Aggregate::OpenCodeConfig,
                config_artifacts,
                Template::OpenCodeConfig { instructions_glob },
            ),
        ];
        sort_outputs(&mut outputs);
        tracing::debug!(target_name = %self.name, outputs = outputs.len(), "Enumerated OpenCode outputs");
        outputs
    }

    fn render(&self, descriptor: &OutputDescriptor<'_>) -> Result<String> {
        match &descriptor.template {
            Template::OpenCodeConfig { instructions_glob } => {
                self.render_config(descriptor, instructions_glob)
            }
            Template::RulesIndex => self.render_rules_index(descriptor),
            other => Err(self.render_error(
                descriptor,
                format!("template {other:?} is not an OpenCode template"),
            )),
        }
    }
}
