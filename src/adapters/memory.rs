//! In-memory test doubles with fully controlled time.
//!
//! `MemoryFileSystem` keeps every file in a shared map so a test can hand a
//! clone to a [`ServiceContext`](crate::context::ServiceContext) and inspect
//! the result afterwards. Writes to paths registered with
//! [`MemoryFileSystem::fail_writes_to`] fail, which is how the error paths of
//! the roller are exercised.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, FixedOffset, Utc};

use crate::ports::clock::Clock;
use crate::ports::filesystem::{DirEntry, FileSystem};

/// Clock frozen at a single instant.
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[derive(Debug, Clone)]
struct MemoryFile {
    bytes: Vec<u8>,
    modified: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, MemoryFile>,
    dirs: BTreeSet<PathBuf>,
    failing: BTreeSet<PathBuf>,
}

/// Filesystem held entirely in memory. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file with the given contents and modification time.
    /// The parent directory is created implicitly.
    pub fn add_file(
        &self,
        path: impl Into<PathBuf>,
        bytes: impl Into<Vec<u8>>,
        modified: DateTime<Utc>,
    ) {
        let path = path.into();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            state.dirs.insert(parent.to_path_buf());
        }
        state.files.insert(path, MemoryFile { bytes: bytes.into(), modified });
    }

    /// Adds an empty directory.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.lock().dirs.insert(path.into());
    }

    /// Makes every subsequent write or rename targeting `path` fail.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.lock().failing.insert(path.into());
    }

    /// Returns the contents of a file, if present.
    #[must_use]
    pub fn file(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().files.get(path).map(|f| f.bytes.clone())
    }

    /// Returns every file path currently stored.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory filesystem lock poisoned")
    }
}

fn not_found(path: &Path) -> Box<dyn std::error::Error + Send + Sync> {
    format!("No such file or directory: {}", path.display()).into()
}

impl FileSystem for MemoryFileSystem {
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.lock();
        if !state.dirs.contains(path) {
            return Err(not_found(path));
        }
        let mut entries: Vec<DirEntry> = state
            .files
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .filter_map(|(p, f)| {
                let name = p.file_name()?.to_os_string();
                Some(DirEntry { name, is_file: true, modified: f.modified })
            })
            .collect();
        entries.extend(state.dirs.iter().filter(|d| d.parent() == Some(path)).filter_map(|d| {
            let name = d.file_name()?.to_os_string();
            Some(DirEntry { name, is_file: false, modified: DateTime::<Utc>::UNIX_EPOCH })
        }));
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        self.file(path).ok_or_else(|| not_found(path))
    }

    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(String::from_utf8(self.read(path)?)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.lock();
        if state.failing.contains(path) {
            return Err(format!("Permission denied: {}", path.display()).into());
        }
        match path.parent() {
            Some(parent) if state.dirs.contains(parent) => {}
            _ => return Err(not_found(path)),
        }
        let file = MemoryFile { bytes: contents.to_vec(), modified: Utc::now() };
        state.files.insert(path.to_path_buf(), file);
        Ok(())
    }

    fn rename(
        &self,
        from: &Path,
        to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.lock();
        if state.failing.contains(to) {
            return Err(format!("Permission denied: {}", to.display()).into());
        }
        let file = state.files.remove(from).ok_or_else(|| not_found(from))?;
        state.files.insert(to.to_path_buf(), file);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.lock().files.remove(path).map(|_| ()).ok_or_else(|| not_found(path))
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn lists_only_direct_children() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/w/a.h", "a", at(1));
        fs.add_file("/w/sub/b.h", "b", at(2));

        let entries = fs.list_dir(Path::new("/w")).unwrap();
        let names: Vec<(&str, bool)> = entries
            .iter()
            .map(|e| (e.name.to_str().unwrap(), e.is_file))
            .collect();
        assert_eq!(names, [("a.h", true), ("sub", false)]);
    }

    #[test]
    fn failing_path_rejects_writes() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/w");
        fs.fail_writes_to("/w/main.cpp");

        assert!(fs.write(Path::new("/w/main.cpp"), b"x").is_err());
        assert!(fs.write(Path::new("/w/other.cpp"), b"x").is_ok());
        assert!(fs.file(Path::new("/w/main.cpp")).is_none());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let fs = MemoryFileSystem::new();
        assert!(fs.write(Path::new("/nowhere/x.h"), b"x").is_err());
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/w");
        let clone = fs.clone();
        clone.write(Path::new("/w/x.h"), b"shared").unwrap();
        assert_eq!(fs.file(Path::new("/w/x.h")).unwrap(), b"shared");
    }
}
