//! Manifest model for agent-scaffold.
//!
//! The manifest (`.agents/manifest.yaml` or `.agents/manifest.json`) declares
//! the project, the canonical artifact directories, the consumer targets and
//! the artifact inventory. This crate provides:
//!
//! - [`document`]: the serde shape of the file, parsed strictly
//!   (unknown keys are rejected)
//! - [`model`]: the validated, read-only [`Manifest`] handed to the engine
//! - [`validate`]: the document-to-model transformation
//! - [`paths`]: canonical and generated path resolution
//! - [`loader`]: manifest discovery, loading and saving
//!
//! # Example
//!
//! ```
//! use scaffold_manifest::{ManifestDocument, Manifest};
//!
//! let document = ManifestDocument::starter("demo");
//! let manifest = Manifest::from_document(document).unwrap();
//! assert_eq!(manifest.targets.len(), 3);
//! ```

pub mod document;
pub mod error;
pub mod id;
pub mod loader;
pub mod model;
pub mod paths;
pub mod validate;

pub use document::{ArtifactEntry, ManifestDocument};
pub use error::{Error, Result};
pub use loader::{MANIFEST_JSON, MANIFEST_YAML, ManifestLocation, find_manifest, load_document, load_manifest, save_document};
pub use model::{
    Agent, ArtifactKind, ArtifactRef, Artifacts, Command, CopilotOverride, CopilotSurface,
    CopilotTarget, Instruction, InstructionScope, Manifest, OpenCodeOverride, OpenCodeTarget,
    Overrides, PathsConfig, ProjectConfig, Prompt, Scope, Skill, StubMode, Target, TargetConfig,
    TargetKind, TargetOverride, UserInput,
};

/// The only manifest schema version this engine understands.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;
