use super::StorageBackend;
use crate::error::{Result, WorkbenchError};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const STATE_FILENAME: &str = "state.json";

/// File-backed state store rooted at the workbench data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(WorkbenchError::Io)?;
        }
        Ok(())
    }

    fn load_state(&self) -> Result<BTreeMap<String, String>> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(WorkbenchError::Io)?;
        serde_json::from_str(&content).map_err(WorkbenchError::Serialization)
    }

    fn save_state(&self, state: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(state).map_err(WorkbenchError::Serialization)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".state-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(WorkbenchError::Io)?;
        fs::rename(&tmp_file, self.state_path()).map_err(WorkbenchError::Io)?;
        debug!("wrote {} keys to {}", state.len(), self.state_path().display());
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_state()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.load_state()?;
        state.insert(key.to_string(), value.to_string());
        self.save_state(&state)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.load_state()?;
        if state.remove(key).is_some() {
            self.save_state(&state)?;
        }
        Ok(())
    }

    fn create_folder(&self, path: &Path) -> Result<()> {
        debug!("creating folder {}", path.display());
        self.ensure_dir(path)
    }

    fn remove_folder(&self, path: &Path) -> Result<()> {
        debug!("removing folder {}", path.display());
        fs::remove_dir_all(path).map_err(WorkbenchError::Io)
    }

    fn folder_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
