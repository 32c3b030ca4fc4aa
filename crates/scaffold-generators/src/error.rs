//! Error types for scaffold-generators

use scaffold_fs::NormalizedPath;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Render failed for {target} output {output}: {message}")]
    Render {
        target: String,
        output: NormalizedPath,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
