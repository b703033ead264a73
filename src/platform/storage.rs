//! Key/value storage backends
//!
//! Values are JSON strings stored under fixed keys ("slots"). The browser
//! build uses LocalStorage; native builds write one file per key.

use std::collections::HashMap;

use thiserror::Error;

/// Storage failure
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend missing entirely (no window, storage disabled, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Value could not be encoded
    #[error("could not encode value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key/value store
pub trait Storage {
    /// Read a slot. A missing slot is `Ok(None)`, not an error.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage; nothing survives a restart
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves a half-written slot
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("LocalStorage disabled".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get_item("slot").unwrap().is_none());
        storage.set_item("slot", "[1,2]").unwrap();
        assert_eq!(storage.get_item("slot").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_file_storage_roundtrip_and_missing() {
        let dir = std::env::temp_dir().join(format!(
            "classic-pong-storage-{}-{}",
            std::process::id(),
            line!()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let mut storage = FileStorage::new(&dir);
        assert!(storage.get_item("pongHighScores").unwrap().is_none());

        storage.set_item("pongHighScores", "[]").unwrap();
        assert_eq!(
            storage.get_item("pongHighScores").unwrap().as_deref(),
            Some("[]")
        );
        assert!(!dir.join("pongHighScores.json.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::Unavailable("no window".to_string());
        assert_eq!(err.to_string(), "storage unavailable: no window");
        let err: StorageError = std::io::Error::other("disk full").into();
        assert_eq!(err.to_string(), "storage I/O error: disk full");
        assert!(std::error::Error::source(&err).is_some());
    }
}
