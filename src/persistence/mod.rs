//! Checkpoint progress persistence
//!
//! Progress is a single integer (highest checkpoint reached) stored as its
//! decimal text. Stores only move whole values: a reader sees either the old
//! value or the new one, never a partial write.
//!
//! Backends:
//! - [`MemoryStore`]: tests and headless runs
//! - [`FileStore`]: native, temp file + rename
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage failure
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("progress file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("progress storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable home for the progress value
pub trait ProgressStore {
    /// Stored text, or None if nothing has been saved
    fn read(&self) -> Result<Option<String>, ProgressError>;
    /// Replace the stored text
    fn write(&mut self, value: &str) -> Result<(), ProgressError>;
    /// Remove the stored value entirely
    fn clear(&mut self) -> Result<(), ProgressError>;
}

impl<T: ProgressStore + ?Sized> ProgressStore for Box<T> {
    fn read(&self) -> Result<Option<String>, ProgressError> {
        (**self).read()
    }

    fn write(&mut self, value: &str) -> Result<(), ProgressError> {
        (**self).write(value)
    }

    fn clear(&mut self) -> Result<(), ProgressError> {
        (**self).clear()
    }
}

/// Interpret stored progress text as a checkpoint index.
///
/// Absent, malformed or negative values mean 0. Values past the last
/// checkpoint are clamped to it.
pub fn parse_checkpoint(raw: Option<&str>, checkpoint_count: u32) -> u32 {
    let last = checkpoint_count.saturating_sub(1);
    let Some(raw) = raw else {
        return 0;
    };

    match serde_json::from_str::<i64>(raw.trim()) {
        Ok(value) => value.clamp(0, i64::from(last)) as u32,
        Err(e) => {
            log::warn!("Ignoring malformed progress value {:?}: {}", raw, e);
            0
        }
    }
}

/// Load the saved checkpoint from `store`, treating any failure as 0
pub fn load_checkpoint(store: &dyn ProgressStore, checkpoint_count: u32) -> u32 {
    match store.read() {
        Ok(raw) => parse_checkpoint(raw.as_deref(), checkpoint_count),
        Err(e) => {
            log::warn!("Could not read progress, starting from checkpoint 0: {}", e);
            0
        }
    }
}

/// Persist `checkpoint` to `store`
pub fn save_checkpoint(store: &mut dyn ProgressStore, checkpoint: u32) -> Result<(), ProgressError> {
    store.write(&checkpoint.to_string())
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw text (may be malformed)
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// Current raw value
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ProgressStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, ProgressError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), ProgressError> {
        self.value = Some(value.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ProgressError> {
        self.value = None;
        Ok(())
    }
}

/// File-backed store.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProgressStore for FileStore {
    fn read(&self) -> Result<Option<String>, ProgressError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, value: &str) -> Result<(), ProgressError> {
        let tmp = self.tmp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ProgressError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sandrun-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_parse_checkpoint() {
        assert_eq!(parse_checkpoint(None, 45), 0);
        assert_eq!(parse_checkpoint(Some("7"), 45), 7);
        assert_eq!(parse_checkpoint(Some(" 12\n"), 45), 12);
        assert_eq!(parse_checkpoint(Some("99"), 45), 44);
        assert_eq!(parse_checkpoint(Some("-3"), 45), 0);
        assert_eq!(parse_checkpoint(Some("banana"), 45), 0);
        assert_eq!(parse_checkpoint(Some(""), 45), 0);
        assert_eq!(parse_checkpoint(Some("3"), 0), 0);
    }

    #[test]
    fn test_memory_store_roundtrip_and_clear() {
        let mut store = MemoryStore::new();
        assert_eq!(load_checkpoint(&store, 45), 0);

        save_checkpoint(&mut store, 5).unwrap();
        assert_eq!(store.value(), Some("5"));
        assert_eq!(load_checkpoint(&store, 45), 5);

        store.clear().unwrap();
        assert_eq!(store.value(), None);
        assert_eq!(load_checkpoint(&store, 45), 0);
    }

    #[test]
    fn test_file_store_missing_file_reads_as_absent() {
        let store = FileStore::new(scratch_path("missing.txt"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_file_store_write_replaces_whole_value() {
        let path = scratch_path("progress.txt");
        let mut store = FileStore::new(&path);

        save_checkpoint(&mut store, 12).unwrap();
        save_checkpoint(&mut store, 3).unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("3"));
        assert!(!store.tmp_path().exists());

        store.clear().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_read_error_loads_zero() {
        // A directory cannot be read as a file
        let dir = scratch_path("a-directory");
        fs::create_dir_all(&dir).unwrap();
        let store = FileStore::new(&dir);
        assert!(store.read().is_err());
        assert_eq!(load_checkpoint(&store, 45), 0);
    }
}
