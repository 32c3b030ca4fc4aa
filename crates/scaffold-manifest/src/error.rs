//! Error types for scaffold-manifest

use std::path::PathBuf;

use crate::model::ArtifactKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No manifest found under {root}. Expected .agents/manifest.yaml or .agents/manifest.json")]
    NotFound { root: PathBuf },

    #[error("Schema error at {location}: {message}")]
    Schema { location: String, message: String },

    #[error("Unsupported schema version {found} (this engine supports {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Reference error at {location}: target '{target}' is not declared in targets")]
    Reference { location: String, target: String },

    #[error("Duplicate {kind} identifier '{id}'")]
    DuplicateId { kind: ArtifactKind, id: String },

    #[error("Invalid {kind} identifier '{id}': identifiers must be kebab-case ([a-z0-9-])")]
    InvalidId { kind: ArtifactKind, id: String },

    #[error(transparent)]
    Fs(#[from] scaffold_fs::Error),
}

impl Error {
    pub fn schema(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Malformed or unsupported manifest structure.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::Schema { .. }
                | Self::UnsupportedVersion { .. }
                | Self::DuplicateId { .. }
                | Self::InvalidId { .. }
        )
    }

    /// Dangling reference to an undeclared target.
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Self::Reference { .. })
    }
}
