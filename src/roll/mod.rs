//! Rolling a header forward.
//!
//! A roll scans a directory for the newest header, copies it byte-for-byte
//! under a name derived from the current local minute, and rewrites the
//! companion source file so it includes nothing but that copy:
//!
//! ```text
//! A.h (older)   B.h (newest)   WireEngine.h (ignored)
//!                  │
//!                  ▼ copy
//!          W_08_12_2025_21_10.h  ◄── main.cpp: #include "W_08_12_2025_21_10.h"
//! ```
//!
//! The copy and the rewrite are two separate writes. If the rewrite fails
//! the copy stays on disk; [`RollConfig::staged`] narrows that window.

pub mod naming;
pub mod scan;
pub mod write;

use std::fmt;
use std::path::{Path, PathBuf};

pub use naming::GeneratedName;
pub use scan::{scan_candidates, select_latest, CandidateFile};

use crate::config::RollConfig;
use crate::context::ServiceContext;
use crate::error::RollError;

/// Progress points reported while a roll runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Milestone {
    /// The newest candidate was found.
    LatestFound {
        /// Its file name.
        name: String,
    },
    /// The copy was written.
    Created {
        /// Generated file name.
        name: GeneratedName,
    },
    /// The companion file now includes the copy.
    CompanionUpdated {
        /// Companion file name.
        companion: String,
        /// Generated file name.
        name: GeneratedName,
    },
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatestFound { name } => write!(f, "Latest header: {name}"),
            Self::Created { name } => write!(f, "Created new header: {name}"),
            Self::CompanionUpdated { companion, name } => {
                write!(f, "{companion} updated to include {name}")
            }
        }
    }
}

/// What a roll did (or, for a dry run, would do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// The header that was copied.
    pub selected: CandidateFile,
    /// Name given to the copy.
    pub generated: GeneratedName,
    /// Full path of the copy.
    pub copy_path: PathBuf,
    /// Full path of the rewritten companion.
    pub companion_path: PathBuf,
    /// Number of bytes copied (0 for a dry run).
    pub bytes_copied: usize,
    /// `true` when nothing was written.
    pub dry_run: bool,
}

/// Runs rolls against the ports of a [`ServiceContext`].
pub struct VersionRoller<'a> {
    ctx: &'a ServiceContext,
    config: &'a RollConfig,
    progress: Option<Box<dyn Fn(&Milestone) + 'a>>,
}

impl<'a> VersionRoller<'a> {
    /// Creates a roller. Nothing is reported until [`Self::on_progress`] is set.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a RollConfig) -> Self {
        Self { ctx, config, progress: None }
    }

    /// Registers a callback invoked at each [`Milestone`].
    #[must_use]
    pub fn on_progress(mut self, report: impl Fn(&Milestone) + 'a) -> Self {
        self.progress = Some(Box::new(report));
        self
    }

    fn report(&self, milestone: &Milestone) {
        tracing::debug!(%milestone, "progress");
        if let Some(report) = &self.progress {
            report(milestone);
        }
    }

    /// All candidates in `dir`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::Io`] if the directory cannot be listed.
    pub fn candidates(&self, dir: &Path) -> Result<Vec<CandidateFile>, RollError> {
        scan_candidates(self.ctx.fs.as_ref(), dir, self.config)
    }

    /// Rolls the newest header in `dir`.
    ///
    /// # Errors
    ///
    /// - [`RollError::NoCandidateFound`] when nothing is eligible; nothing is written.
    /// - [`RollError::Io`] when the source cannot be read or an output cannot
    ///   be written. A copy written before a failed companion rewrite is kept.
    pub fn run(&self, dir: &Path) -> Result<RollOutcome, RollError> {
        let fs = self.ctx.fs.as_ref();
        let candidates = self.candidates(dir)?;
        let selected = select_latest(&candidates).cloned().ok_or_else(|| {
            RollError::NoCandidateFound {
                dir: dir.to_path_buf(),
                suffix: self.config.suffix.clone(),
            }
        })?;
        self.report(&Milestone::LatestFound { name: selected.display_name() });

        let generated =
            GeneratedName::at(&self.ctx.clock.now(), &self.config.prefix, &self.config.suffix);
        let copy_path = dir.join(generated.as_str());
        let companion_path = self.config.companion_path(dir);

        if self.config.dry_run {
            tracing::info!(copy = %copy_path.display(), "dry run, nothing written");
            return Ok(RollOutcome {
                selected,
                generated,
                copy_path,
                companion_path,
                bytes_copied: 0,
                dry_run: true,
            });
        }

        // The whole source is read before anything is written, so a copy
        // onto itself (second roll in the same minute) is harmless.
        let bytes = write::read_source(fs, &selected.path)?;
        let include_line = generated.include_line();

        if self.config.staged {
            write::commit_staged(fs, &copy_path, &bytes, &companion_path, &include_line)?;
            self.report(&Milestone::Created { name: generated.clone() });
        } else {
            write::write_copy(fs, &copy_path, &bytes)?;
            self.report(&Milestone::Created { name: generated.clone() });
            write::rewrite_companion(fs, &companion_path, &include_line)?;
        }
        self.report(&Milestone::CompanionUpdated {
            companion: self.config.companion.clone(),
            name: generated.clone(),
        });

        Ok(RollOutcome {
            selected,
            generated,
            copy_path,
            companion_path,
            bytes_copied: bytes.len(),
            dry_run: false,
        })
    }
}
