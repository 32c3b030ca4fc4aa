//! agent-scaffold CLI
//!
//! Thin command-line layer over the sync engine and doctor checks.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let root = commands::resolve_root(&cli.root)?;
    tracing::debug!(root = %root, "Resolved repository root");

    match cli.command {
        Commands::Init { name, force } => commands::run_init(&root, name.as_deref(), force),
        Commands::Sync {
            target,
            prune,
            dry_run,
            json,
        } => commands::run_sync(&root, target, prune, dry_run, json),
        Commands::Diff { target, prune } => commands::run_diff(&root, target, prune),
        Commands::Doctor { json } => commands::run_doctor(&root, json),
    }
}
