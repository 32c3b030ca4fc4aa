//! Generator trait and output descriptors

use std::cmp::Ordering;

use scaffold_fs::NormalizedPath;
use scaffold_manifest::{ArtifactKind, ArtifactRef, Manifest};

use crate::error::Result;

/// Shared outputs that aggregate several artifacts into one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Aggregate {
    /// Copilot repository-wide instructions file
    RepoInstructions,
    /// OpenCode `AGENTS.md` rules index
    RulesIndex,
    /// OpenCode JSON configuration
    OpenCodeConfig,
}

impl Aggregate {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RepoInstructions => "repository instructions",
            Self::RulesIndex => "rules index",
            Self::OpenCodeConfig => "OpenCode config",
        }
    }
}

/// Sort key of an output.
///
/// Per-artifact outputs order by identifier, then by kind precedence;
/// aggregates follow all of them in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputKey {
    Artifact { id: String, kind: ArtifactKind },
    Aggregate(Aggregate),
}

impl std::fmt::Display for OutputKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Artifact { id, kind } => write!(f, "{kind} '{id}'"),
            Self::Aggregate(aggregate) => f.write_str(aggregate.label()),
        }
    }
}

/// How a descriptor is turned into file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Frontmatter plus a pointer to one artifact's canonical file
    Pointer,
    /// List of pointers to every enabled repo-scope instruction
    RepoInstructions,
    /// Markdown index of every enabled instruction
    RulesIndex,
    /// OpenCode JSON configuration; carries the canonical instructions glob
    OpenCodeConfig { instructions_glob: String },
}

/// One file a generator intends to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDescriptor<'m> {
    pub path: NormalizedPath,
    pub key: OutputKey,
    /// Artifacts the content is derived from, ordered by identifier
    pub artifacts: Vec<ArtifactRef<'m>>,
    pub template: Template,
}

impl<'m> OutputDescriptor<'m> {
    /// Descriptor for a single-artifact pointer file.
    pub fn pointer(path: NormalizedPath, artifact: ArtifactRef<'m>) -> Self {
        Self {
            path,
            key: OutputKey::Artifact {
                id: artifact.id().to_string(),
                kind: artifact.kind(),
            },
            artifacts: vec![artifact],
            template: Template::Pointer,
        }
    }

    /// Descriptor for an aggregate output.
    pub fn aggregate(
        path: NormalizedPath,
        aggregate: Aggregate,
        mut artifacts: Vec<ArtifactRef<'m>>,
        template: Template,
    ) -> Self {
        artifacts.sort_by(|a, b| compare_artifacts(*a, *b));
        Self {
            path,
            key: OutputKey::Aggregate(aggregate),
            artifacts,
            template,
        }
    }
}

fn compare_artifacts(a: ArtifactRef<'_>, b: ArtifactRef<'_>) -> Ordering {
    a.id().cmp(b.id()).then(a.kind().cmp(&b.kind()))
}

/// Sort descriptors into their canonical generation order.
pub fn sort_outputs(outputs: &mut [OutputDescriptor<'_>]) {
    outputs.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.path.cmp(&b.path)));
}

/// A rendered output, ready for the orchestrator to compare and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: NormalizedPath,
    pub content: String,
}

/// A target implementation.
///
/// Generators are stateless apart from their target configuration: they
/// describe outputs and render content, but never touch the filesystem.
pub trait Generator {
    /// Name of the target this generator serves (e.g. `copilot-vscode`).
    fn target(&self) -> &str;

    /// Every output this target derives from the manifest, in canonical order.
    ///
    /// Artifacts disabled for this target are skipped.
    fn enumerate_outputs<'m>(&self, manifest: &'m Manifest) -> Vec<OutputDescriptor<'m>>;

    /// Render one descriptor produced by [`Generator::enumerate_outputs`].
    fn render(&self, descriptor: &OutputDescriptor<'_>) -> Result<String>;

    /// Enumerate and render every output.
    fn generate(&self, manifest: &Manifest) -> Result<Vec<GeneratedFile>> {
        self.enumerate_outputs(manifest)
            .iter()
            .map(|descriptor| {
                Ok(GeneratedFile {
                    path: descriptor.path.clone(),
                    content: self.render(descriptor)?,
                })
            })
            .collect()
    }
}
