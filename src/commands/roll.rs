//! `headroll roll` command.

use std::path::Path;

use crate::config::RollConfig;
use crate::context::ServiceContext;
use crate::error::RollError;
use crate::roll::VersionRoller;

/// Execute the `roll` command, printing `[INFO]` lines as it goes.
///
/// # Errors
///
/// Returns an error if no candidate exists or any write fails.
pub fn run(ctx: &ServiceContext, dir: &Path, config: &RollConfig) -> Result<(), RollError> {
    let outcome = VersionRoller::new(ctx, config)
        .on_progress(|milestone| println!("[INFO] {milestone}"))
        .run(dir)?;

    if outcome.dry_run {
        println!(
            "[INFO] Dry run: would copy {} to {} and point {} at it",
            outcome.selected.display_name(),
            outcome.generated,
            config.companion,
        );
    } else {
        tracing::info!(
            source = %outcome.selected.path.display(),
            copy = %outcome.copy_path.display(),
            bytes = outcome.bytes_copied,
            "roll complete"
        );
    }
    Ok(())
}
