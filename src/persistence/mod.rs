//! Fail-soft JSON persistence
//!
//! Loading never fails: a missing, unreadable or corrupt slot yields the
//! default value. Saving reports errors so callers can log them, but the
//! in-memory value always stays authoritative.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::platform::{Storage, StorageError};

/// Load a value from a storage slot, falling back to `T::default()`
pub fn load<T>(storage: &dyn Storage, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match storage.get_item(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => {
                log::info!("Loaded {}", key);
                value
            }
            Err(e) => {
                log::warn!("Stored {} is corrupt ({}), using defaults", key, e);
                T::default()
            }
        },
        Ok(None) => {
            log::info!("No stored {}, using defaults", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Could not read {} ({}), using defaults", key, e);
            T::default()
        }
    }
}

/// Serialize a value into a storage slot
pub fn save<T>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)?;
    log::info!("Saved {}", key);
    Ok(())
}

/// Like [`save`], but only logs failures
pub fn save_or_warn<T>(storage: &mut dyn Storage, key: &str, value: &T)
where
    T: Serialize + ?Sized,
{
    if let Err(e) = save(storage, key, value) {
        log::warn!("Could not save {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    /// Storage that refuses everything
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("broken".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("broken".to_string()))
        }
    }

    #[test]
    fn test_roundtrip() {
        let mut storage = MemoryStorage::new();
        save(&mut storage, "numbers", &vec![3u32, 1, 2]).unwrap();
        let loaded: Vec<u32> = load(&storage, "numbers");
        assert_eq!(loaded, vec![3, 1, 2]);
    }

    #[test]
    fn test_missing_and_corrupt_load_defaults() {
        let mut storage = MemoryStorage::new();
        let loaded: Vec<u32> = load(&storage, "numbers");
        assert!(loaded.is_empty());

        storage.set_item("numbers", "{not json").unwrap();
        let loaded: Vec<u32> = load(&storage, "numbers");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_unavailable_storage_fails_soft() {
        let mut storage = BrokenStorage;
        let loaded: Vec<u32> = load(&storage, "numbers");
        assert!(loaded.is_empty());
        assert!(save(&mut storage, "numbers", &vec![1u32]).is_err());
        save_or_warn(&mut storage, "numbers", &vec![1u32]);
    }
}
