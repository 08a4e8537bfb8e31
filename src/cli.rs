//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI parser for `headroll`.
#[derive(Debug, Parser)]
#[command(
    name = "headroll",
    version,
    about = "Snapshot the newest header under a timestamped name and include it from main.cpp"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use instead of `<DIR>/headroll.yaml`.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy the newest header to a timestamped name and point the companion at it.
    Roll {
        /// Directory and filter options.
        #[command(flatten)]
        target: TargetArgs,
        /// Stage both files under temporary names and commit them by rename.
        #[arg(long)]
        staged: bool,
        /// Show what would be done without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// List eligible headers, newest first.
    Candidates {
        /// Directory and filter options.
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Directory to work in (defaults to the current directory).
    pub dir: Option<PathBuf>,

    /// Header suffix to look for, matched case-insensitively.
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Additional file name to skip (repeatable).
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Drop the built-in and configured ignore lists; only `--ignore` names apply.
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Companion file rewritten to include the snapshot.
    #[arg(long, value_name = "FILE")]
    pub companion: Option<String>,

    /// Leading component of the generated name.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}
