use super::StorageBackend;
use crate::error::{Result, WorkbenchError};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the workbench is
/// single-threaded. Folders are tracked as a set of paths; removing a folder
/// drops every tracked path beneath it.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    folders: RefCell<BTreeSet<PathBuf>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Every folder currently tracked, sorted.
    pub fn folders(&self) -> Vec<PathBuf> {
        self.folders.borrow().iter().cloned().collect()
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(WorkbenchError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }

    fn create_folder(&self, path: &Path) -> Result<()> {
        self.check_writable()?;
        self.folders.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn remove_folder(&self, path: &Path) -> Result<()> {
        self.check_writable()?;
        let mut folders = self.folders.borrow_mut();
        if !folders.iter().any(|f| f.starts_with(path)) {
            return Err(WorkbenchError::Store(format!(
                "Folder not found: {}",
                path.display()
            )));
        }
        folders.retain(|f| !f.starts_with(path));
        Ok(())
    }

    fn folder_exists(&self, path: &Path) -> bool {
        self.folders.borrow().iter().any(|f| f.starts_with(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_folder_is_recursive() {
        let backend = MemBackend::new();
        backend.create_folder(Path::new("/home/profiles/a")).unwrap();
        backend.create_folder(Path::new("/home/profiles/b")).unwrap();

        backend.remove_folder(Path::new("/home/profiles")).unwrap();

        assert!(backend.folders().is_empty());
        assert!(!backend.folder_exists(Path::new("/home/profiles")));
    }

    #[test]
    fn parent_of_tracked_folder_exists() {
        let backend = MemBackend::new();
        backend.create_folder(Path::new("/home/profiles/a")).unwrap();
        assert!(backend.folder_exists(Path::new("/home/profiles")));
    }

    #[test]
    fn simulated_write_error_blocks_set() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        assert!(backend.set("k", "v").is_err());
        assert_eq!(backend.get("k").unwrap(), None);
    }
}
