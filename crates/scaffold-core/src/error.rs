//! Error types for scaffold-core

use std::path::PathBuf;

use scaffold_fs::NormalizedPath;

/// Result type for scaffold-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning or applying a sync
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Target filter names a target the manifest does not declare
    #[error("Unknown target '{name}'. Declared targets: {}", available.join(", "))]
    UnknownTarget { name: String, available: Vec<String> },

    /// Two outputs map to the same path with different owners or content
    #[error("Output conflict at {path}: produced by {first} and {second}")]
    Conflict {
        path: NormalizedPath,
        first: String,
        second: String,
    },

    /// Generated-file record is unreadable or invalid
    #[error("Generated-file record at {path} is invalid: {message}")]
    Record { path: PathBuf, message: String },

    #[error(transparent)]
    Manifest(#[from] scaffold_manifest::Error),

    #[error(transparent)]
    Generator(#[from] scaffold_generators::Error),

    #[error(transparent)]
    Fs(#[from] scaffold_fs::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
