//! Core library entry for the `headroll` CLI.
//!
//! `headroll` snapshots the most recently modified header of a directory
//! under a name derived from the current local minute and rewrites the
//! companion `main.cpp` to include that snapshot. See [`roll`] for the
//! operation itself; everything else adapts it to a command line.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod ports;
pub mod roll;

use clap::Parser;

pub use error::RollError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), RollError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    logging::init(cli.verbose);
    commands::dispatch(&cli)
}
