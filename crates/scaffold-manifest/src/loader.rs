//! Manifest discovery, loading and saving

use scaffold_fs::{DocumentStore, NormalizedPath};

use crate::document::ManifestDocument;
use crate::model::Manifest;
use crate::{Error, Result};

/// Manifest location relative to the repository root, preferred format.
pub const MANIFEST_YAML: &str = ".agents/manifest.yaml";

/// JSON fallback, used when no YAML manifest exists.
pub const MANIFEST_JSON: &str = ".agents/manifest.json";

/// A discovered manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    /// Repository root the manifest belongs to
    pub root: NormalizedPath,
    /// Full path of the manifest file
    pub path: NormalizedPath,
}

/// Find the manifest under `root`, preferring YAML over JSON.
pub fn find_manifest(root: &NormalizedPath) -> Option<ManifestLocation> {
    [MANIFEST_YAML, MANIFEST_JSON]
        .into_iter()
        .map(|relative| root.join(relative))
        .find(NormalizedPath::is_file)
        .map(|path| ManifestLocation {
            root: root.clone(),
            path,
        })
}

/// Parse the manifest file without validating it.
///
/// Syntax errors, type mismatches, missing fields and unknown keys are all
/// reported as [`Error::Schema`].
pub fn load_document(location: &ManifestLocation) -> Result<ManifestDocument> {
    let store = DocumentStore::new();
    store.load(&location.path).map_err(|e| match e {
        scaffold_fs::Error::Parse { path, message, .. } => {
            Error::schema(path.display().to_string(), message)
        }
        other => Error::Fs(other),
    })
}

/// Discover, parse and validate the manifest under `root`.
pub fn load_manifest(root: &NormalizedPath) -> Result<Manifest> {
    let location = find_manifest(root).ok_or_else(|| Error::NotFound {
        root: root.to_native(),
    })?;
    tracing::debug!(path = %location.path, "Loading manifest");

    let manifest = Manifest::from_document(load_document(&location)?)?;
    tracing::debug!(
        targets = manifest.targets.len(),
        artifacts = manifest.artifacts.iter().count(),
        "Manifest validated"
    );
    Ok(manifest)
}

/// Write a manifest document, in the format implied by the file extension.
pub fn save_document(path: &NormalizedPath, document: &ManifestDocument) -> Result<()> {
    DocumentStore::new().save(path, document)?;
    Ok(())
}
