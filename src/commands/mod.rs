//! Command dispatch and handlers.

pub mod candidates;
pub mod roll;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command, TargetArgs};
use crate::config::{FileConfig, IgnoreSet, RollConfig, CONFIG_FILE_NAME};
use crate::context::ServiceContext;
use crate::error::RollError;

/// Environment variable naming a directory to record port traffic into.
pub const RECORD_ENV: &str = "HEADROLL_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `HEADROLL_RECORD` is set to a directory path, clock and filesystem
/// interactions are recorded to per-port cassette files below it.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), RollError> {
    let (ctx, session) = if let Ok(path) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(Path::new(&path))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(cli, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        return settle(result, finish_recording(session));
    }

    result
}

/// The command's own error wins over a recording failure.
fn settle(
    result: Result<(), RollError>,
    recording: Result<(), RollError>,
) -> Result<(), RollError> {
    match (result, recording) {
        (Err(err), Err(recording_err)) => {
            tracing::warn!(error = %recording_err, "recording could not be finished");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), recording) => recording,
    }
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error if configuration cannot be resolved or the handler fails.
pub fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext) -> Result<(), RollError> {
    match &cli.command {
        Command::Roll { target, staged, dry_run } => {
            let dir = target_dir(target)?;
            let mut config = resolve_config(ctx, &dir, cli.config.as_deref(), target)?;
            config.staged |= *staged;
            config.dry_run = *dry_run;
            roll::run(ctx, &dir, &config)
        }
        Command::Candidates { target } => {
            let dir = target_dir(target)?;
            let config = resolve_config(ctx, &dir, cli.config.as_deref(), target)?;
            candidates::run(ctx, &dir, &config)
        }
    }
}

fn target_dir(target: &TargetArgs) -> Result<PathBuf, RollError> {
    match &target.dir {
        Some(dir) => Ok(dir.clone()),
        None => env::current_dir().map_err(|e| RollError::io("resolve", ".", e)),
    }
}

/// Layers defaults, the configuration file and command-line flags.
///
/// # Errors
///
/// Returns an error if the configuration file is invalid or the resulting
/// settings cannot form file names.
pub fn resolve_config(
    ctx: &ServiceContext,
    dir: &Path,
    explicit: Option<&Path>,
    target: &TargetArgs,
) -> Result<RollConfig, RollError> {
    let mut config = RollConfig::default();

    let file = match explicit {
        Some(path) => FileConfig::load(ctx.fs.as_ref(), path, true)?,
        None => FileConfig::load(ctx.fs.as_ref(), &dir.join(CONFIG_FILE_NAME), false)?,
    };
    if let Some(file) = file {
        config.apply_file(file);
    }

    if let Some(suffix) = &target.suffix {
        config.suffix.clone_from(suffix);
    }
    if target.no_default_ignores {
        config.ignore = IgnoreSet::empty();
    }
    for name in &target.ignore {
        config.ignore.insert(name.clone());
    }
    if let Some(companion) = &target.companion {
        config.companion.clone_from(companion);
    }
    if let Some(prefix) = &target.prefix {
        config.prefix.clone_from(prefix);
    }

    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), RollError> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
