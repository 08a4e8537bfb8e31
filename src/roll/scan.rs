//! Directory scan and selection of the newest candidate.

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::RollConfig;
use crate::error::RollError;
use crate::ports::FileSystem;

/// A file eligible to become the snapshot source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Full path inside the scanned directory.
    pub path: PathBuf,
    /// File name, not necessarily valid UTF-8.
    pub name: OsString,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Newest first; equal timestamps fall back to ascending name.
fn newest_first(a: &CandidateFile, b: &CandidateFile) -> Ordering {
    b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name))
}

impl CandidateFile {
    /// The file name for display, with invalid UTF-8 replaced.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

/// ASCII case-insensitive suffix match on the raw name bytes.
fn has_suffix(name: &OsStr, suffix: &str) -> bool {
    let name = name.as_encoded_bytes();
    let suffix = suffix.as_bytes();
    name.len()
        .checked_sub(suffix.len())
        .is_some_and(|start| name[start..].eq_ignore_ascii_case(suffix))
}

fn is_ignored(name: &OsStr, config: &RollConfig) -> bool {
    name.to_str().is_some_and(|name| config.ignore.contains(name))
}

/// Lists the regular files of `dir` that end with the configured suffix and
/// are not ignored, newest first.
///
/// # Errors
///
/// Returns [`RollError::Io`] if the directory cannot be listed.
pub fn scan_candidates(
    fs: &dyn FileSystem,
    dir: &Path,
    config: &RollConfig,
) -> Result<Vec<CandidateFile>, RollError> {
    let entries = fs.list_dir(dir).map_err(|e| RollError::io("list", dir, e))?;

    let mut candidates: Vec<CandidateFile> = entries
        .into_iter()
        .filter(|entry| {
            if !has_suffix(&entry.name, &config.suffix) {
                return false;
            }
            if is_ignored(&entry.name, config) {
                tracing::debug!(name = ?entry.name, "ignored");
                return false;
            }
            if !entry.is_file {
                tracing::debug!(name = ?entry.name, "not a regular file");
                return false;
            }
            true
        })
        .map(|entry| CandidateFile {
            path: dir.join(&entry.name),
            name: entry.name,
            modified: entry.modified,
        })
        .collect();

    candidates.sort_by(newest_first);
    tracing::debug!(dir = %dir.display(), count = candidates.len(), "scanned candidates");
    Ok(candidates)
}

/// Picks the candidate with the greatest modification time.
///
/// Ties go to the lexicographically smallest name so the choice does not
/// depend on directory listing order.
#[must_use]
pub fn select_latest(candidates: &[CandidateFile]) -> Option<&CandidateFile> {
    candidates.iter().min_by(|a, b| newest_first(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::config::IgnoreSet;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_765_000_000 + secs, 0).unwrap()
    }

    fn names(candidates: &[CandidateFile]) -> Vec<String> {
        candidates.iter().map(CandidateFile::display_name).collect()
    }

    fn candidate(name: &str, modified: DateTime<Utc>) -> CandidateFile {
        CandidateFile { path: Path::new("/w").join(name), name: name.into(), modified }
    }

    #[test]
    fn filters_suffix_case_insensitively_and_skips_ignored() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/w/A.h", "a", at(1));
        fs.add_file("/w/LOUD.H", "l", at(2));
        fs.add_file("/w/WireEngine.h", "e", at(9));
        fs.add_file("/w/main.cpp", "m", at(10));
        fs.add_file("/w/notes.hpp", "n", at(11));
        fs.add_dir("/w/dir.h");

        let found = scan_candidates(&fs, Path::new("/w"), &RollConfig::default()).unwrap();
        assert_eq!(names(&found), ["LOUD.H", "A.h"]);
        assert_eq!(found[1].path, PathBuf::from("/w/A.h"));
    }

    #[test]
    fn ignore_set_is_injected() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/w/WireEngine.h", "e", at(1));
        fs.add_file("/w/mine.h", "m", at(2));

        let config = RollConfig {
            ignore: IgnoreSet::from_iter(["mine.h"]),
            ..RollConfig::default()
        };
        let found = scan_candidates(&fs, Path::new("/w"), &config).unwrap();
        assert_eq!(names(&found), ["WireEngine.h"]);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let fs = MemoryFileSystem::new();
        let err =
            scan_candidates(&fs, Path::new("/nope"), &RollConfig::default()).unwrap_err();
        assert!(matches!(err, RollError::Io { op: "list", .. }));
    }

    #[test]
    fn selects_strictly_newest() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/w/A.h", "a", at(1));
        fs.add_file("/w/B.h", "b", at(5));
        fs.add_file("/w/C.h", "c", at(3));

        let found = scan_candidates(&fs, Path::new("/w"), &RollConfig::default()).unwrap();
        assert_eq!(select_latest(&found).unwrap().display_name(), "B.h");
    }

    #[test]
    fn ties_go_to_smallest_name() {
        let newest = at(7);
        let candidates = vec![
            candidate("b.h", newest),
            candidate("old.h", at(1)),
            candidate("a.h", newest),
        ];
        assert_eq!(select_latest(&candidates).unwrap().display_name(), "a.h");
    }

    #[test]
    fn suffix_match_works_on_raw_bytes() {
        assert!(has_suffix(OsStr::new("sketch.H"), ".h"));
        assert!(!has_suffix(OsStr::new("h"), ".h"));
        assert!(!has_suffix(OsStr::new("main.cpp"), ".h"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_is_a_candidate() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9.h");
        assert!(has_suffix(name, ".h"));
        assert!(!is_ignored(name, &RollConfig::default()));
    }

    #[test]
    fn nothing_to_select_from_empty_scan() {
        assert!(select_latest(&[]).is_none());
    }
}
