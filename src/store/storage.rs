//! Snapshot storage backends.

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Where the serialized snapshot lives.
///
/// `load` returns `Ok(None)` when nothing was ever saved (first run).
pub trait SnapshotStorage {
    fn load(&self) -> io::Result<Option<String>>;

    fn save(&self, contents: &str) -> io::Result<()>;

    /// Short description for log messages.
    fn describe(&self) -> String;
}

/// JSON file on disk.
///
/// Saves go through a temporary sibling file and a rename, so a crash mid-write
/// leaves the previous snapshot in place.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStorage for FileStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let mut file = File::create(&temp)?;
        file.write_all(contents.as_bytes())?;
        // Data must be on disk before the rename makes it visible
        file.sync_all()?;
        drop(file);

        fs::rename(&temp, &self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    contents: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// In-memory storage with a shared handle.
///
/// Clones see the same contents, so a test can keep one handle while the store
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds a saved document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.state.borrow_mut().contents = Some(contents.into());
        storage
    }

    pub fn contents(&self) -> Option<String> {
        self.state.borrow().contents.clone()
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    /// Make subsequent saves fail, as a full disk would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.contents())
    }

    fn save(&self, contents: &str) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(io::Error::new(ErrorKind::StorageFull, "storage quota exceeded"));
        }
        state.contents = Some(contents.to_string());
        state.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_parent_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let storage = FileStorage::new(&path);

        storage.save("{\"a\":1}").unwrap();
        storage.save("{\"a\":2}").unwrap();

        assert_eq!(storage.load().unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(!dir.path().join("nested").join("data.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_shorter_save_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data.json"));

        storage.save(&"x".repeat(4096)).unwrap();
        storage.save("{}").unwrap();

        assert_eq!(storage.load().unwrap().as_deref(), Some("{}"));
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[test]
    fn test_memory_storage_shares_state_between_clones() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.save("x").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("x"));
        assert_eq!(handle.write_count(), 1);
    }

    #[test]
    fn test_memory_storage_failing_writes_keep_old_contents() {
        let storage = MemoryStorage::with_contents("old");
        storage.set_fail_writes(true);

        assert!(storage.save("new").is_err());
        assert_eq!(storage.contents().as_deref(), Some("old"));
        assert_eq!(storage.write_count(), 0);
    }
}
