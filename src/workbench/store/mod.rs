//! # Storage Layer
//!
//! Profiles live in an external key/value state store. The [`StorageBackend`]
//! trait covers the "how" of that store (a JSON file on disk or plain maps in
//! memory), while [`crate::profiles::ProfileService`] owns the "what": which
//! keys exist, what shape their values have, and when folders are created or
//! removed.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production storage
//!   - all keys in one `state.json` object, rewritten atomically
//!   - profile folders are real directories
//!
//! - [`mem_backend::MemBackend`]: in-memory storage for tests
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── state.json          # {"userDataProfiles": "[...]", "profileAssociations": "{...}"}
//! ├── config.json         # WorkbenchConfig
//! └── profiles/
//!     └── <id>/           # one folder per named profile
//! ```

use crate::error::{Result, WorkbenchError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub mod fs_backend;
pub mod mem_backend;

/// Raw key/value and folder I/O.
///
/// All methods take `&self`; backends that mutate in memory use interior
/// mutability since the workbench is single-threaded.
pub trait StorageBackend {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Drop a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Create a folder and any missing parents.
    fn create_folder(&self, path: &Path) -> Result<()>;

    /// Recursively delete a folder.
    fn remove_folder(&self, path: &Path) -> Result<()>;

    fn folder_exists(&self, path: &Path) -> bool;
}

/// Decode a JSON value stored under `key`, or the type's default when absent.
pub fn load_json<B, T>(backend: &B, key: &str) -> Result<T>
where
    B: StorageBackend + ?Sized,
    T: DeserializeOwned + Default,
{
    match backend.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(WorkbenchError::Serialization),
        None => Ok(T::default()),
    }
}

/// Encode `value` as JSON under `key`. Empty collections remove the key instead.
pub fn save_json<B, T>(backend: &B, key: &str, value: &T, is_empty: bool) -> Result<()>
where
    B: StorageBackend + ?Sized,
    T: Serialize,
{
    if is_empty {
        return backend.remove(key);
    }
    let raw = serde_json::to_string(value).map_err(WorkbenchError::Serialization)?;
    backend.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn missing_key_loads_default() {
        let backend = MemBackend::new();
        let map: BTreeMap<String, String> = load_json(&backend, "nothing").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn saving_empty_value_removes_key() {
        let backend = MemBackend::new();
        backend.set("k", "[1]").unwrap();
        save_json(&backend, "k", &Vec::<u8>::new(), true).unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
    }

    #[test]
    fn corrupt_value_is_a_serialization_error() {
        let backend = MemBackend::new();
        backend.set("k", "{not json").unwrap();
        let err = load_json::<_, Vec<String>>(&backend, "k").unwrap_err();
        assert!(matches!(err, WorkbenchError::Serialization(_)));
    }
}
