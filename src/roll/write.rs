//! Duplication of the selected header and the companion rewrite.

use std::path::{Path, PathBuf};

use crate::error::RollError;
use crate::ports::FileSystem;

/// Suffix of the hidden files used while staging a commit.
const STAGING_SUFFIX: &str = ".headroll-tmp";

/// Reads the source bytes in full.
///
/// # Errors
///
/// Returns [`RollError::Io`] if the source cannot be read.
pub fn read_source(fs: &dyn FileSystem, source: &Path) -> Result<Vec<u8>, RollError> {
    fs.read(source).map_err(|e| RollError::io("read", source, e))
}

/// Writes `bytes` to `dest`, creating or truncating it.
///
/// # Errors
///
/// Returns [`RollError::Io`] if the destination cannot be written.
pub fn write_copy(fs: &dyn FileSystem, dest: &Path, bytes: &[u8]) -> Result<(), RollError> {
    fs.write(dest, bytes).map_err(|e| RollError::io("write", dest, e))
}

/// Truncates `companion` and writes the include line into it.
///
/// # Errors
///
/// Returns [`RollError::Io`] if the companion cannot be written.
pub fn rewrite_companion(
    fs: &dyn FileSystem,
    companion: &Path,
    include_line: &str,
) -> Result<(), RollError> {
    fs.write(companion, include_line.as_bytes()).map_err(|e| RollError::io("write", companion, e))
}

/// `dir/name` becomes `dir/.name.headroll-tmp`.
#[must_use]
pub fn staging_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}{STAGING_SUFFIX}"))
}

/// Writes both outputs under staging names, then renames them into place,
/// copy first.
///
/// If staging fails, the staged files are removed and neither target is
/// touched. A failed final rename of the companion leaves the committed copy
/// in place, the same state an unstaged run leaves behind.
///
/// # Errors
///
/// Returns [`RollError::Io`] for the first failing write or rename.
pub fn commit_staged(
    fs: &dyn FileSystem,
    dest: &Path,
    bytes: &[u8],
    companion: &Path,
    include_line: &str,
) -> Result<(), RollError> {
    let staged_copy = staging_path(dest);
    let staged_companion = staging_path(companion);
    let discard = |paths: &[&Path]| {
        for path in paths {
            if let Err(e) = fs.remove_file(path) {
                tracing::warn!(path = %path.display(), error = %e, "could not remove staged file");
            }
        }
    };

    write_copy(fs, &staged_copy, bytes)?;
    if let Err(err) = rewrite_companion(fs, &staged_companion, include_line) {
        discard(&[staged_copy.as_path()]);
        return Err(err);
    }
    tracing::debug!("both outputs staged");

    if let Err(e) = fs.rename(&staged_copy, dest) {
        discard(&[staged_copy.as_path(), staged_companion.as_path()]);
        return Err(RollError::io("rename", dest, e));
    }
    if let Err(e) = fs.rename(&staged_companion, companion) {
        discard(&[staged_companion.as_path()]);
        return Err(RollError::io("rename", companion, e));
    }
    Ok(())
}
