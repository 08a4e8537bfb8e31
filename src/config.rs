//! Roll configuration: defaults, the optional `headroll.yaml`, and overrides.
//!
//! Settings are layered: [`RollConfig::default`] first, then a
//! `headroll.yaml` found in the target directory (or named with
//! `--config`), then command-line flags. Later layers win.
//!
//! ```yaml
//! suffix: .h
//! companion: main.cpp
//! prefix: W
//! staged: false
//! # replaces the built-in ignore list
//! ignore: [WireEngine.h]
//! # added on top of whichever list is in effect
//! extra_ignore: [scratch.h]
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RollError;
use crate::ports::FileSystem;

/// Name of the configuration file looked up in the target directory.
pub const CONFIG_FILE_NAME: &str = "headroll.yaml";

/// Headers never picked as the snapshot source unless the ignore list is replaced.
pub const DEFAULT_IGNORED: [&str; 4] =
    ["WireEngine.h", "WireEngine_v3.h", "WireEngine_v4.h", "make_new_version.h"];

/// File names excluded from candidacy. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreSet(BTreeSet<String>);

impl IgnoreSet {
    /// An empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in set, [`DEFAULT_IGNORED`].
    #[must_use]
    pub fn builtin() -> Self {
        DEFAULT_IGNORED.into_iter().collect()
    }

    /// Returns `true` if `name` must be skipped.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Adds a name to the set.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.0.insert(name.into());
    }

    /// Iterates over the names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of names in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Everything that shapes a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollConfig {
    /// Case-insensitive suffix a candidate must end with; also the suffix of
    /// the generated name.
    pub suffix: String,
    /// Names excluded from candidacy.
    pub ignore: IgnoreSet,
    /// File rewritten to include the snapshot.
    pub companion: String,
    /// Leading component of the generated name.
    pub prefix: String,
    /// Stage both writes under temporary names and commit them by rename.
    pub staged: bool,
    /// Report what would happen without writing.
    pub dry_run: bool,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            suffix: ".h".to_string(),
            ignore: IgnoreSet::builtin(),
            companion: "main.cpp".to_string(),
            prefix: "W".to_string(),
            staged: false,
            dry_run: false,
        }
    }
}

/// On-disk shape of `headroll.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Overrides [`RollConfig::suffix`].
    pub suffix: Option<String>,
    /// Replaces the ignore set.
    pub ignore: Option<Vec<String>>,
    /// Extends the ignore set.
    pub extra_ignore: Vec<String>,
    /// Overrides [`RollConfig::companion`].
    pub companion: Option<String>,
    /// Overrides [`RollConfig::prefix`].
    pub prefix: Option<String>,
    /// Overrides [`RollConfig::staged`].
    pub staged: Option<bool>,
}

impl FileConfig {
    /// Reads a configuration file through the filesystem port.
    ///
    /// With `explicit == false` a missing file is not an error and yields
    /// `Ok(None)`; an explicitly requested file must exist.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::Config`] if the file cannot be read or parsed.
    pub fn load(
        fs: &dyn FileSystem,
        path: &Path,
        explicit: bool,
    ) -> Result<Option<Self>, RollError> {
        if !explicit && !fs.exists(path) {
            tracing::debug!(path = %path.display(), "no configuration file");
            return Ok(None);
        }
        let config_error =
            |message: String| RollError::Config { path: path.to_path_buf(), message };
        let text = fs.read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let parsed = serde_yaml::from_str(&text).map_err(|e| config_error(e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(Some(parsed))
    }
}

impl RollConfig {
    /// Applies a parsed configuration file on top of `self`.
    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(suffix) = file.suffix {
            self.suffix = suffix;
        }
        if let Some(ignore) = file.ignore {
            self.ignore = ignore.into_iter().collect();
        }
        for name in file.extra_ignore {
            self.ignore.insert(name);
        }
        if let Some(companion) = file.companion {
            self.companion = companion;
        }
        if let Some(prefix) = file.prefix {
            self.prefix = prefix;
        }
        if let Some(staged) = file.staged {
            self.staged = staged;
        }
    }

    /// Checks that the settings can produce valid file names.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::InvalidSetting`] for an empty suffix or companion,
    /// or any name component containing a path separator.
    pub fn validate(&self) -> Result<(), RollError> {
        if self.suffix.is_empty() {
            return Err(RollError::InvalidSetting("suffix must not be empty".into()));
        }
        if self.companion.is_empty() {
            return Err(RollError::InvalidSetting("companion file name must not be empty".into()));
        }
        for (what, value) in
            [("suffix", &self.suffix), ("companion", &self.companion), ("prefix", &self.prefix)]
        {
            if value.contains(['/', '\\']) {
                return Err(RollError::InvalidSetting(format!(
                    "{what} must be a plain file name component, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Path of the companion file inside `dir`.
    #[must_use]
    pub fn companion_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.companion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use chrono::Utc;

    #[test]
    fn defaults_skip_engine_headers() {
        let config = RollConfig::default();
        assert_eq!(config.suffix, ".h");
        assert_eq!(config.companion, "main.cpp");
        assert_eq!(config.prefix, "W");
        assert!(config.ignore.contains("WireEngine.h"));
        assert!(config.ignore.contains("WireEngine_v3.h"));
        assert!(!config.ignore.contains("wireengine.h"));
        assert_eq!(config.ignore.len(), DEFAULT_IGNORED.len());
    }

    #[test]
    fn file_config_replaces_then_extends_ignore_set() {
        let mut config = RollConfig::default();
        config.apply_file(FileConfig {
            ignore: Some(vec!["Engine.h".into()]),
            extra_ignore: vec!["scratch.h".into()],
            companion: Some("sketch.ino".into()),
            staged: Some(true),
            ..FileConfig::default()
        });

        let ignored: Vec<&str> = config.ignore.iter().collect();
        assert_eq!(ignored, ["Engine.h", "scratch.h"]);
        assert_eq!(config.companion, "sketch.ino");
        assert!(config.staged);
        assert_eq!(config.suffix, ".h");
    }

    #[test]
    fn load_missing_implicit_file_is_none() {
        let fs = MemoryFileSystem::new();
        let loaded = FileConfig::load(&fs, Path::new("/w/headroll.yaml"), false).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let fs = MemoryFileSystem::new();
        let err = FileConfig::load(&fs, Path::new("/w/custom.yaml"), true).unwrap_err();
        assert!(matches!(err, RollError::Config { .. }));
    }

    #[test]
    fn load_parses_yaml() {
        let fs = MemoryFileSystem::new();
        fs.add_file(
            "/w/headroll.yaml",
            "suffix: .hpp\nextra_ignore:\n  - keep.hpp\n",
            Utc::now(),
        );
        let loaded = FileConfig::load(&fs, Path::new("/w/headroll.yaml"), false).unwrap().unwrap();
        assert_eq!(loaded.suffix.as_deref(), Some(".hpp"));
        assert_eq!(loaded.extra_ignore, vec!["keep.hpp".to_string()]);
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/w/headroll.yaml", "sufix: .h\n", Utc::now());
        let err = FileConfig::load(&fs, Path::new("/w/headroll.yaml"), false).unwrap_err();
        assert!(err.to_string().contains("sufix"));
    }

    #[test]
    fn empty_file_means_no_overrides() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/w/headroll.yaml", "\n", Utc::now());
        let loaded = FileConfig::load(&fs, Path::new("/w/headroll.yaml"), false).unwrap();
        assert_eq!(loaded, Some(FileConfig::default()));
    }

    #[test]
    fn validate_rejects_path_components() {
        let config = RollConfig { companion: "../main.cpp".into(), ..RollConfig::default() };
        assert!(matches!(config.validate(), Err(RollError::InvalidSetting(_))));

        let config = RollConfig { suffix: String::new(), ..RollConfig::default() };
        assert!(config.validate().is_err());

        assert!(RollConfig::default().validate().is_ok());
    }
}
