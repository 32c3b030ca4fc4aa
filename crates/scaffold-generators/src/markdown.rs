//! Banner, frontmatter and pointer rendering shared by the generators

use scaffold_fs::NormalizedPath;
use scaffold_manifest::{ArtifactKind, StubMode};
use serde_json::{Map, Value};

use crate::error::Result;

/// Token that marks a file as engine-owned.
pub const BANNER: &str = "agent-scaffold:generated";

/// Full banner text placed in every generated file.
pub const BANNER_TEXT: &str = "agent-scaffold:generated (do not edit; run `agent-scaffold sync`)";

/// Whether `content` carries the generated banner near its start.
///
/// Only the first few lines are inspected, so a canonical file that merely
/// mentions the token in its body is not mistaken for generated output.
pub fn has_banner(content: &[u8]) -> bool {
    String::from_utf8_lossy(content)
        .lines()
        .take(3)
        .any(|line| line.contains(BANNER))
}

/// Ordered frontmatter block.
///
/// Values are emitted as JSON, which YAML accepts as flow scalars and
/// collections, so every value is quoted consistently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    entries: Vec<(String, Value)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing an existing value in place.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Set a key only when a value is present.
    pub fn set_opt(&mut self, key: &str, value: Option<impl Into<Value>>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Apply per-target overrides: known keys keep their position, new keys
    /// are appended in sorted order.
    pub fn merge(&mut self, overrides: &Map<String, Value>) {
        let mut keys: Vec<&String> = overrides.keys().collect();
        keys.sort();
        for key in keys {
            self.set(key, overrides[key].clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn render(&self) -> Result<String> {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&serde_json::to_string(value)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Open a Markdown document with the banner.
///
/// With frontmatter the banner becomes a YAML comment on the first line of
/// the block, so the block itself still starts at byte 0.
pub fn document_head(frontmatter: &Frontmatter) -> Result<String> {
    if frontmatter.is_empty() {
        return Ok(format!("<!-- {BANNER_TEXT} -->\n"));
    }
    Ok(format!(
        "---\n# {BANNER_TEXT}\n{}---\n",
        frontmatter.render()?
    ))
}

/// The fixed sentence that points at a canonical file.
pub fn pointer_sentence(kind: ArtifactKind, canonical: &NormalizedPath) -> String {
    format!("Read and follow the canonical {kind} in `{canonical}`.")
}

/// Pointer sentence plus, in link mode, a Markdown link relative to `from`.
pub fn pointer_body(
    kind: ArtifactKind,
    canonical: &NormalizedPath,
    from: &NormalizedPath,
    stub_mode: StubMode,
) -> String {
    let mut body = pointer_sentence(kind, canonical);
    body.push('\n');
    if stub_mode == StubMode::Link {
        body.push('\n');
        body.push_str(&format!("[{canonical}]({})\n", canonical.link_from(from)));
    }
    body
}
