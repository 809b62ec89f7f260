use crate::error::{Result, WorkbenchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TOC_DEPTH: usize = 6;
const DEFAULT_PROFILE_NAME: &str = "Default";

/// Configuration for workbench, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkbenchConfig {
    /// Deepest heading level included when rendering a table of contents (1-6)
    #[serde(default = "default_toc_depth")]
    pub toc_depth: usize,

    /// Display name of the always-present default profile
    #[serde(default = "default_profile_name")]
    pub default_profile_name: String,
}

fn default_toc_depth() -> usize {
    DEFAULT_TOC_DEPTH
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            toc_depth: DEFAULT_TOC_DEPTH,
            default_profile_name: default_profile_name(),
        }
    }
}

/// Keys settable through `workbench config <key> <value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    TocDepth,
    DefaultProfileName,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::TocDepth, ConfigKey::DefaultProfileName];

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "toc-depth" => Some(ConfigKey::TocDepth),
            "default-profile-name" => Some(ConfigKey::DefaultProfileName),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::TocDepth => "toc-depth",
            ConfigKey::DefaultProfileName => "default-profile-name",
        }
    }
}

impl WorkbenchConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(WorkbenchError::Io)?;
        let config: WorkbenchConfig =
            serde_json::from_str(&content).map_err(WorkbenchError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(WorkbenchError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(WorkbenchError::Serialization)?;
        fs::write(config_path, content).map_err(WorkbenchError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::TocDepth => self.toc_depth.to_string(),
            ConfigKey::DefaultProfileName => self.default_profile_name.clone(),
        }
    }

    /// Validate and apply a raw value for `key`.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::TocDepth => {
                let depth: usize = value.parse().map_err(|_| {
                    WorkbenchError::Config(format!("toc-depth must be a number, got '{}'", value))
                })?;
                if !(1..=6).contains(&depth) {
                    return Err(WorkbenchError::Config(format!(
                        "toc-depth must be between 1 and 6, got {}",
                        depth
                    )));
                }
                self.toc_depth = depth;
            }
            ConfigKey::DefaultProfileName => {
                let name = value.trim();
                if name.is_empty() {
                    return Err(WorkbenchError::Config(
                        "default-profile-name cannot be empty".to_string(),
                    ));
                }
                self.default_profile_name = name.to_string();
            }
        }
        Ok(())
    }
}
