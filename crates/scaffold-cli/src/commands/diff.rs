//! Diff command implementation
//!
//! Previews what sync would write as unified diffs without applying anything.

use colored::Colorize;
use similar::TextDiff;

use scaffold_core::{PlannedWrite, SyncEngine, SyncOptions};
use scaffold_fs::NormalizedPath;
use scaffold_manifest::load_manifest;

use crate::error::Result;

/// Run the diff command
pub fn run_diff(root: &NormalizedPath, target: Option<String>, prune: bool) -> Result<()> {
    let manifest = load_manifest(root)?;
    let options = SyncOptions {
        target,
        prune,
        dry_run: true,
    };

    let engine = SyncEngine::new(root.clone());
    let record = engine.load_record()?;
    let plan = engine.plan(&manifest, &record, &options)?;

    if plan.writes.is_empty() && plan.stale.is_empty() {
        println!(
            "{} No changes needed. Generated files are in sync.",
            "OK".green().bold()
        );
        return Ok(());
    }

    for write in &plan.writes {
        print_write(write);
    }
    for path in &plan.stale {
        println!("{} {}", "deleted:".red().bold(), path);
    }
    Ok(())
}

fn print_write(write: &PlannedWrite) {
    let old = write.previous.as_deref().unwrap_or("");
    let diff = TextDiff::from_lines(old, write.content.as_str());
    let old_header = if write.previous.is_some() {
        format!("a/{}", write.path)
    } else {
        "/dev/null".to_string()
    };
    let unified = diff
        .unified_diff()
        .header(&old_header, &format!("b/{}", write.path))
        .to_string();

    for line in unified.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}
