//! Service context bundling the port trait objects a roll needs.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::recording::{RecordingClock, RecordingFileSystem};
use crate::adapters::replaying::{ReplayingClock, ReplayingFileSystem};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::error::RollError;
use crate::ports::clock::Clock;
use crate::ports::filesystem::{DirEntry, FileSystem};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Clock naming the snapshot.
    pub clock: Box<dyn Clock>,
    /// Filesystem scanned and written.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, fs: Box<dyn FileSystem>) -> Self {
        Self { clock, fs }
    }

    /// Creates a live context with the system clock and real disk.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveClock), Box::new(LiveFileSystem))
    }

    /// Creates a live context whose port traffic is recorded to per-port
    /// cassettes under `root`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(root: &Path) -> Result<(Self, RecordingSession), RollError> {
        let session = RecordingSession::new_in(root)?;
        let ctx = Self::new(
            Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs))),
        );
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette holding every port.
    ///
    /// Each port gets its own replayer from the same cassette so that
    /// per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, RollError> {
        Ok(Self::new(
            Box::new(ReplayingClock::new(CassetteReplayer::load(path)?)),
            Box::new(ReplayingFileSystem::new(CassetteReplayer::load(path)?)),
        ))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use a panicking adapter that
    /// fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, RollError> {
        let replayers = config.load_all()?;

        Ok(Self::new(
            match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
        ))
    }
}

// --- Panicking adapters for unspecified ports ---

const NO_FS_CASSETTE: &str =
    "FileSystem port not configured in CassetteConfig: no cassette loaded for fs";

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        panic!("{NO_FS_CASSETTE}");
    }
    fn read(&self, _path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        panic!("{NO_FS_CASSETTE}");
    }
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("{NO_FS_CASSETTE}");
    }
    fn write(
        &self,
        _path: &Path,
        _contents: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("{NO_FS_CASSETTE}");
    }
    fn rename(
        &self,
        _from: &Path,
        _to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("{NO_FS_CASSETTE}");
    }
    fn remove_file(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("{NO_FS_CASSETTE}");
    }
    fn exists(&self, _path: &Path) -> bool {
        panic!("{NO_FS_CASSETTE}");
    }
}
