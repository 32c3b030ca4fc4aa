//! Init command implementation
//!
//! Writes the starter manifest and the canonical directories it references.

use std::fs;

use colored::Colorize;

use scaffold_fs::NormalizedPath;
use scaffold_manifest::{MANIFEST_YAML, ManifestDocument, find_manifest, save_document};

use crate::error::{CliError, Result};

/// Run the init command
///
/// Never writes canonical artifact bodies, only empty directories.
pub fn run_init(root: &NormalizedPath, name: Option<&str>, force: bool) -> Result<()> {
    if let Some(existing) = find_manifest(root) {
        if !force {
            return Err(CliError::user(format!(
                "Manifest already exists at {}. Use --force to overwrite it.",
                existing.path
            )));
        }
        tracing::warn!(path = %existing.path, "Overwriting existing manifest");
    }

    let name = name
        .map(str::to_string)
        .or_else(|| root.file_name().map(str::to_string))
        .unwrap_or_else(|| "project".to_string());
    let document = ManifestDocument::starter(&name);

    let manifest_path = root.join(MANIFEST_YAML);
    save_document(&manifest_path, &document)?;
    println!("{} Wrote {}", "+".green(), MANIFEST_YAML.cyan());

    let paths = &document.paths;
    for dir in [
        &paths.prompts_dir,
        &paths.commands_dir,
        &paths.agents_dir,
        &paths.instructions_dir,
        &paths.skills_dir,
    ] {
        fs::create_dir_all(root.join(dir.as_str()).to_native())?;
        tracing::debug!(dir = %dir, "Created canonical directory");
    }

    println!();
    println!(
        "{} Initialized agent-scaffold project '{}'",
        "OK".green().bold(),
        name
    );
    println!(
        "Declare artifacts in {}, then run {}.",
        MANIFEST_YAML.cyan(),
        "agent-scaffold sync".cyan()
    );
    Ok(())
}
