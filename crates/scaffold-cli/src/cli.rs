//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// agent-scaffold - Generate AI-assistant files from one canonical manifest
#[derive(Parser, Debug)]
#[command(name = "agent-scaffold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository root containing .agents/
    #[arg(long, global = true, default_value = ".", env = "AGENT_SCAFFOLD_ROOT")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write a starter manifest and create the canonical directories
    ///
    /// Examples:
    ///   agent-scaffold init
    ///   agent-scaffold init --name my-project
    ///   agent-scaffold init --force    # replace an existing manifest
    Init {
        /// Project name (defaults to the root directory name)
        #[arg(long)]
        name: Option<String>,

        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },

    /// Generate target files from the manifest
    Sync {
        /// Only write outputs of this target
        #[arg(short, long)]
        target: Option<String>,

        /// Delete previously generated files that are no longer produced
        #[arg(long)]
        prune: bool,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what sync would change as unified diffs
    Diff {
        /// Only show outputs of this target
        #[arg(short, long)]
        target: Option<String>,

        /// Also list files a pruning sync would delete
        #[arg(long)]
        prune: bool,
    },

    /// Check the manifest and canonical files for problems
    Doctor {
        /// Output the results as JSON
        #[arg(long)]
        json: bool,
    },
}
