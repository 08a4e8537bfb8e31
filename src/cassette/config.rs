//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::replayer::CassetteReplayer;
use crate::error::RollError;

/// Per-port cassette file paths. Ports without a cassette path will panic
/// if called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Picks up `clock.cassette.yaml` and `fs.cassette.yaml` from a directory
    /// written by a [`RecordingSession`](super::session::RecordingSession).
    /// Missing files leave the port unconfigured.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        let existing = |port: &str| {
            let path = dir.join(format!("{port}.cassette.yaml"));
            path.is_file().then_some(path)
        };
        Self { clock: existing("clock"), fs: existing("fs") }
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, RollError> {
        Ok(PortReplayers {
            clock: self.clock.as_deref().map(CassetteReplayer::load).transpose()?,
            fs: self.fs.as_deref().map(CassetteReplayer::load).transpose()?,
        })
    }
}
