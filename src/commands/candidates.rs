//! `headroll candidates` command.

use std::path::Path;

use chrono::Local;

use crate::config::RollConfig;
use crate::context::ServiceContext;
use crate::error::RollError;
use crate::roll::VersionRoller;

/// Execute the `candidates` command.
///
/// Prints a table of eligible headers, newest first, marking the one a
/// `roll` would pick.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn run(ctx: &ServiceContext, dir: &Path, config: &RollConfig) -> Result<(), RollError> {
    let candidates = VersionRoller::new(ctx, config).candidates(dir)?;
    if candidates.is_empty() {
        println!("No {} files found in {}.", config.suffix, dir.display());
        return Ok(());
    }

    let rows: Vec<(String, String)> = candidates
        .iter()
        .map(|c| {
            let modified = c.modified.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
            (c.display_name(), modified.to_string())
        })
        .collect();
    let name_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(4).max(4);

    println!("  {:<name_width$}  MODIFIED", "NAME");
    println!("  {:-<name_width$}  {:-<19}", "", "");
    for (i, (name, modified)) in rows.iter().enumerate() {
        let marker = if i == 0 { '*' } else { ' ' };
        println!("{marker} {name:<name_width$}  {modified}");
    }

    println!("\n{} candidate(s); * marks the next roll source.", rows.len());
    Ok(())
}
