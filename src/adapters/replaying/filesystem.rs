//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::extract_result;
use crate::cassette::format::RecordedBytes;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{DirEntry, FileSystem};

/// Replays recorded filesystem operations from a cassette.
///
/// Nothing touches the disk; writes, renames and removals only consume their
/// recorded outcome.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction("fs", method).output.clone()
    }
}

impl FileSystem for ReplayingFileSystem {
    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&self.next_output("list_dir"), "fs::list_dir")
    }

    fn read(&self, _path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        let recorded: RecordedBytes = extract_result(&self.next_output("read"), "fs::read")?;
        recorded.decode()
    }

    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&self.next_output("read_to_string"), "fs::read_to_string")
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&self.next_output("write"), "fs::write")
    }

    fn rename(
        &self,
        _from: &Path,
        _to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&self.next_output("rename"), "fs::rename")
    }

    fn remove_file(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&self.next_output("remove_file"), "fs::remove_file")
    }

    fn exists(&self, _path: &Path) -> bool {
        self.next_output("exists").as_bool().expect("fs::exists: expected boolean output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<(&str, serde_json::Value)>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "0.1.0".into(),
            interactions: interactions
                .into_iter()
                .enumerate()
                .map(|(seq, (method, output))| Interaction {
                    seq: seq as u64,
                    port: "fs".into(),
                    method: method.into(),
                    input: json!(null),
                    output,
                })
                .collect(),
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replays_directory_listing() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![(
            "list_dir",
            json!({"ok": [{"name": "B.h", "is_file": true, "modified": "2025-12-08T20:40:00Z"}]}),
        )]));
        let entries = fs.list_dir(Path::new("/sketch")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "B.h");
        assert!(entries[0].is_file);
    }

    #[test]
    fn replays_binary_read() {
        let body = json!({"len": 3, "base64": "AP8K"});
        let fs = ReplayingFileSystem::new(make_replayer(vec![("read", json!({"ok": body}))]));
        assert_eq!(fs.read(Path::new("/sketch/B.h")).unwrap(), vec![0, 255, 10]);
    }

    #[test]
    fn replays_recorded_write_error() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![(
            "write",
            json!({"err": "Permission denied"}),
        )]));
        let err = fs.write(Path::new("/sketch/main.cpp"), b"x").unwrap_err();
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn replays_successful_write() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![("write", json!({"ok": null}))]));
        assert!(fs.write(Path::new("/sketch/main.cpp"), b"x").is_ok());
    }

    #[test]
    fn replaying_fs_exists() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![("exists", json!(true))]));
        assert!(fs.exists(Path::new("/sketch/headroll.yaml")));
    }
}
