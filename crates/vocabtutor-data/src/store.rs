//! Key-value storage backed by JSON files on disk.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use vocabtutor_core::error::StorageError;
use vocabtutor_core::traits::KeyValueStore;

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(format!("{}: {e}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let write_err = |e: std::io::Error| StorageError::Write(format!("{}: {e}", path.display()));

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        tracing::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write(format!("{}: {e}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vocabtutor_core::scores::{ScoreStore, SCORES_KEY};

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        store.set("k", "{\"a\":1}").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("nested").join("k.json").exists());

        store.set("k", "{}").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("{}"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["a.json"]);
    }

    #[test]
    fn unwritable_dir_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let store = JsonFileStore::new(blocker.join("sub"));
        assert!(matches!(store.set("k", "v"), Err(StorageError::Write(_))));
    }

    #[test]
    fn scores_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let scores = ScoreStore::new(Arc::new(JsonFileStore::new(dir.path())));
        scores.save("francais", "B1", "Food", 8, 2, 10).unwrap();

        let reopened = ScoreStore::new(Arc::new(JsonFileStore::new(dir.path())));
        let record = reopened.get_topic_score("francais", "B1", "Food").unwrap();
        assert_eq!(record.accuracy, 80);
        assert!(dir.path().join(format!("{SCORES_KEY}.json")).exists());
    }

    #[test]
    fn corrupted_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("{SCORES_KEY}.json")), "not json").unwrap();

        let scores = ScoreStore::new(Arc::new(JsonFileStore::new(dir.path())));
        assert!(scores.get_all().is_empty());
        assert!(scores.save("nederlands", "A2", "Huis", 1, 0, 1).is_some());
        assert_eq!(scores.get_all().len(), 1);
    }

    #[test]
    fn unreadable_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{SCORES_KEY}.json"));
        let garbage = [0xff, 0xfe, 0x00, 0x7b];
        std::fs::write(&path, garbage).unwrap();

        let store = JsonFileStore::new(dir.path());
        assert!(matches!(store.get(SCORES_KEY), Err(StorageError::Read(_))));

        let scores = ScoreStore::new(Arc::new(store));
        assert!(scores.save("nederlands", "A2", "Huis", 1, 0, 1).is_none());
        assert_eq!(std::fs::read(&path).unwrap(), garbage);
    }
}
