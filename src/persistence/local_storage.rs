//! Browser LocalStorage backend

use super::{ProgressError, ProgressStore};

/// Progress kept in `window.localStorage` under a fixed key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    /// Default LocalStorage key
    pub const DEFAULT_KEY: &'static str = "sandrun_progress";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, ProgressError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| ProgressError::Unavailable("no LocalStorage".to_owned()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl ProgressStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, ProgressError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| ProgressError::Unavailable(format!("{e:?}")))
    }

    fn write(&mut self, value: &str) -> Result<(), ProgressError> {
        Self::storage()?
            .set_item(&self.key, value)
            .map_err(|e| ProgressError::Unavailable(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), ProgressError> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| ProgressError::Unavailable(format!("{e:?}")))
    }
}
