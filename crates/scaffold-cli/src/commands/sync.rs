//! Sync command implementation

use colored::Colorize;

use scaffold_core::{SyncEngine, SyncOptions, SyncReport};
use scaffold_fs::NormalizedPath;
use scaffold_manifest::load_manifest;

use crate::error::Result;

/// Run the sync command
pub fn run_sync(
    root: &NormalizedPath,
    target: Option<String>,
    prune: bool,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let manifest = load_manifest(root)?;
    let options = SyncOptions {
        target,
        prune,
        dry_run,
    };

    let report = SyncEngine::new(root.clone()).sync(&manifest, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SyncReport) {
    if report.targets.is_empty() {
        println!("{} No enabled targets selected.", "WARN".yellow().bold());
        return;
    }

    let verb = |done: &'static str, planned: &'static str| {
        if report.dry_run { planned } else { done }
    };

    println!(
        "{} {} {}",
        "=>".blue().bold(),
        verb("Synchronized", "Would synchronize"),
        report.targets.join(", ").cyan()
    );

    if !report.has_changes() && report.retained.is_empty() {
        println!(
            "{} Already synchronized. No changes needed.",
            "OK".green().bold()
        );
        return;
    }

    for path in &report.created {
        println!("   {} {} {}", "+".green(), verb("created", "create"), path);
    }
    for path in &report.updated {
        println!("   {} {} {}", "~".yellow(), verb("updated", "update"), path);
    }
    for path in &report.stale {
        println!("   {} {} {}", "-".red(), verb("deleted", "delete"), path);
    }
    for path in &report.retained {
        println!(
            "   {} {} {}",
            "?".dimmed(),
            "no longer generated".dimmed(),
            path
        );
    }
    if !report.retained.is_empty() {
        println!();
        println!(
            "Run {} to delete files that are no longer generated.",
            "agent-scaffold sync --prune".cyan()
        );
    }

    println!();
    println!(
        "{} {} written, {} unchanged",
        "OK".green().bold(),
        report.to_write_count(),
        report.unchanged.len()
    );
}
