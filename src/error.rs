//! Error taxonomy for a roll and its exit-code mapping.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can end a `headroll` run.
#[derive(Debug, Error)]
pub enum RollError {
    /// No file survived the suffix filter and the ignore set.
    #[error("No {suffix} files found in {} (after applying ignore list)", dir.display())]
    NoCandidateFound {
        /// Directory that was scanned.
        dir: PathBuf,
        /// Suffix the scan filtered on.
        suffix: String,
    },

    /// Reading, writing or listing failed.
    #[error("Failed to {op} {}: {message}", path.display())]
    Io {
        /// Operation that failed (`read`, `write`, `list`, ...).
        op: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("Invalid configuration in {}: {message}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A setting (from a flag or the configuration file) is unusable.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Command-line arguments could not be parsed (also carries `--help`).
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// A cassette file could not be loaded for replay.
    #[error("Failed to load cassette {}: {message}", path.display())]
    Cassette {
        /// Cassette file path.
        path: PathBuf,
        /// Read or parse error.
        message: String,
    },

    /// A recording session could not be started or written.
    #[error("Recording failed: {0}")]
    Recording(String),
}

impl RollError {
    pub(crate) fn io(
        op: &'static str,
        path: impl Into<PathBuf>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::Io { op, path: path.into(), message: err.to_string() }
    }

    /// Process exit code for this error.
    ///
    /// `1` for a failed roll (no candidate, I/O), `2` for configuration and
    /// usage problems. Help and version output exit with `0`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NoCandidateFound { .. } | Self::Io { .. } | Self::Recording(_) => 1,
            Self::Config { .. } | Self::InvalidSetting(_) | Self::Cassette { .. } => 2,
            Self::Usage(err) => u8::try_from(err.exit_code()).unwrap_or(2),
        }
    }
}
