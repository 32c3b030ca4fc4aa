//! GitHub Copilot generator (VS Code and CLI surfaces).
//!
//! Emits one pointer file per enabled prompt (VS Code surface only), agent,
//! path-scope instruction and skill, plus one merged repository instructions
//! file when at least one repo-scope instruction is enabled. Pointer files
//! carry a frontmatter block and a sentence naming the canonical file:
//!
//! ```markdown
//! ---
//! # agent-scaffold:generated (do not edit; run `agent-scaffold sync`)
//! applyTo: "**/*.ts"
//! ---
//!
//! Read and follow the canonical instruction in `.agents/instructions/typescript-rules.md`.
//! ```

use scaffold_manifest::paths::copilot_path;
use scaffold_manifest::{ArtifactRef, CopilotTarget, Manifest, Scope, StubMode};

use crate::error::{Error, Result};
use crate::generator::{Aggregate, Generator, OutputDescriptor, Template, sort_outputs};
use crate::markdown::{Frontmatter, document_head, pointer_body};

pub struct CopilotGenerator {
    name: String,
    config: CopilotTarget,
}

impl CopilotGenerator {
    pub fn new(name: impl Into<String>, config: CopilotTarget) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    fn stub_mode(&self, artifact: ArtifactRef<'_>) -> StubMode {
        artifact
            .overrides()
            .copilot(&self.name)
            .map(|o| o.stub_mode)
            .unwrap_or_default()
    }

    fn frontmatter(&self, artifact: ArtifactRef<'_>) -> Frontmatter {
        let mut frontmatter = Frontmatter::new();
        match artifact {
            ArtifactRef::Prompt(prompt) => {
                frontmatter.set("name", prompt.id.as_str());
                frontmatter.set_opt("description", prompt.description.as_deref());
                frontmatter.set_opt("agent", prompt.default_agent.as_deref());
                frontmatter.set_opt("model", prompt.default_model.as_deref());
                if !prompt.tools.is_empty() {
                    frontmatter.set("tools", prompt.tools.clone());
                }
            }
            ArtifactRef::Agent(agent) => {
                frontmatter.set("name", agent.id.as_str());
                frontmatter.set("description", agent.description.as_str());
            }
            ArtifactRef::Instruction(instruction) => {
                frontmatter.set_opt("applyTo", instruction.apply_to());
            }
            ArtifactRef::Skill(skill) => {
                frontmatter.set("name", skill.name.as_deref().unwrap_or(&skill.id));
                let description = skill
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("{} skill", skill.id));
                frontmatter.set("description", description);
            }
            ArtifactRef::Command(_) => {}
        }
        if let Some(overrides) = artifact.overrides().copilot(&self.name) {
            frontmatter.merge(&overrides.frontmatter);
        }
        frontmatter
    }

    fn render_pointer(&self, descriptor: &OutputDescriptor<'_>) -> Result<String> {
        let [artifact] = descriptor.artifacts.as_slice() else {
            return Err(Error::Render {
                target: self.name.clone(),
                output: descriptor.path.clone(),
                message: format!(
                    "pointer output expects one artifact, got {}",
                    descriptor.artifacts.len()
                ),
            });
        };
        let canonical = match artifact {
            ArtifactRef::Skill(skill) => &skill.skill_file,
            other => other.canonical_path(),
        };

        let mut content = document_head(&self.frontmatter(*artifact))?;
        content.push('\n');
        content.push_str(&pointer_body(
            artifact.kind(),
            canonical,
            &descriptor.path,
            self.stub_mode(*artifact),
        ));
        Ok(content)
    }

    fn render_repo_instructions(&self, descriptor: &OutputDescriptor<'_>) -> Result<String> {
        let mut content = document_head(&Frontmatter::new())?;
        content.push_str("\n# Repository instructions\n\n");
        content.push_str("Read and follow the canonical instructions listed below.\n\n");
        for artifact in &descriptor.artifacts {
            let canonical = artifact.canonical_path();
            match self.stub_mode(*artifact) {
                StubMode::Link => content.push_str(&format!(
                    "- [{}]({}): `{canonical}`\n",
                    artifact.id(),
                    canonical.link_from(&descriptor.path)
                )),
                StubMode::Plain => {
                    content.push_str(&format!("- {}: `{canonical}`\n", artifact.id()))
                }
            }
        }
        Ok(content)
    }
}

impl Generator for CopilotGenerator {
    fn target(&self) -> &str {
        &self.name
    }

    fn enumerate_outputs<'m>(&self, manifest: &'m Manifest) -> Vec<OutputDescriptor<'m>> {
        let mut outputs = Vec::new();
        let mut repo_instructions = Vec::new();

        for artifact in manifest.artifacts.iter() {
            if !artifact.is_enabled_for(&self.name) {
                continue;
            }
            if let ArtifactRef::Instruction(instruction) = artifact
                && instruction.scope == Scope::Repo
            {
                repo_instructions.push(artifact);
                continue;
            }
            if let Some(path) = copilot_path(artifact, &self.name, &self.config) {
                outputs.push(OutputDescriptor::pointer(path, artifact));
            }
        }

        if !repo_instructions.is_empty() {
            outputs.push(OutputDescriptor::aggregate(
                self.config.repo_instructions_file.clone(),
                Aggregate::RepoInstructions,
                repo_instructions,
                Template::RepoInstructions,
            ));
        }

        sort_outputs(&mut outputs);
        tracing::debug!(target_name = %self.name, outputs = outputs.len(), "Enumerated Copilot outputs");
        outputs
    }

    fn render(&self, descriptor: &OutputDescriptor<'_>) -> Result<String> {
        match &descriptor.template {
            Template::Pointer => self.render_pointer(descriptor),
            Template::RepoInstructions => self.render_repo_instructions(descriptor),
            other => Err(Error::Render {
                target: self.name.clone(),
                output: descriptor.path.clone(),
                message: format!("template {other:?} is not a Copilot template"),
            }),
        }
    }
}
