//! # Profiles
//!
//! A profile is a named, isolated set of user settings rooted at its own
//! folder. The default profile lives at the data root and always exists;
//! named profiles live under `<data root>/profiles/<id>/`.
//!
//! Profiles are stored as a flat list of [`StoredProfile`] records in the
//! state store and re-hydrated into [`Profile`] values on every read, so the
//! store stays the single source of truth. A second key maps workspaces to
//! the location of the profile they use.
//!
//! Per-resource [`UseDefaultFlags`] let a named profile borrow individual
//! resources (settings, keybindings, …) from the default profile instead of
//! keeping its own copy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod event;
pub mod service;

pub use event::{DidChangeProfilesEvent, JoinableProfileEvent, ListenerId};
pub use service::ProfileService;

/// State store key holding the JSON list of stored profiles.
pub const PROFILES_KEY: &str = "userDataProfiles";
/// State store key holding the JSON workspace → profile location map.
pub const ASSOCIATIONS_KEY: &str = "profileAssociations";

pub const DEFAULT_PROFILE_ID: &str = "__default__profile__";
pub const PROFILES_DIRNAME: &str = "profiles";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UseDefaultFlags {
    pub settings: bool,
    pub keybindings: bool,
    pub tasks: bool,
    pub snippets: bool,
    pub extensions: bool,
    pub ui_state: bool,
}

impl UseDefaultFlags {
    pub const NAMES: [&'static str; 6] = [
        "settings",
        "keybindings",
        "tasks",
        "snippets",
        "extensions",
        "uiState",
    ];

    /// Parse a comma separated list such as `settings,keybindings`.
    pub fn parse_list(list: &str) -> Option<Self> {
        let mut flags = Self::default();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match name {
                "settings" => flags.settings = true,
                "keybindings" => flags.keybindings = true,
                "tasks" => flags.tasks = true,
                "snippets" => flags.snippets = true,
                "extensions" => flags.extensions = true,
                "uiState" | "ui-state" => flags.ui_state = true,
                _ => return None,
            }
        }
        Some(flags)
    }

    pub fn enabled(&self) -> Vec<&'static str> {
        let set = [
            self.settings,
            self.keybindings,
            self.tasks,
            self.snippets,
            self.extensions,
            self.ui_state,
        ];
        Self::NAMES
            .iter()
            .zip(set)
            .filter_map(|(name, on)| on.then_some(*name))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Persisted shape of a named profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub name: String,
    pub location: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_default_flags: Option<UseDefaultFlags>,
}

/// Opaque workspace identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkspaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub location: PathBuf,
    pub is_default: bool,
    pub use_default_flags: Option<UseDefaultFlags>,
    pub global_storage_home: PathBuf,
    pub settings_resource: PathBuf,
    pub keybindings_resource: PathBuf,
    pub tasks_resource: PathBuf,
    pub snippets_home: PathBuf,
    pub extensions_resource: Option<PathBuf>,
}

impl Profile {
    /// The always-present profile rooted at the data directory.
    pub fn default_at(name: &str, root: &Path) -> Self {
        Self {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: name.to_string(),
            location: root.to_path_buf(),
            is_default: true,
            use_default_flags: None,
            global_storage_home: root.join("globalStorage"),
            settings_resource: root.join("settings.json"),
            keybindings_resource: root.join("keybindings.json"),
            tasks_resource: root.join("tasks.json"),
            snippets_home: root.join("snippets"),
            extensions_resource: None,
        }
    }

    /// Build a named profile, borrowing flagged resources from `default`.
    pub fn from_stored(stored: &StoredProfile, default: &Profile) -> Self {
        let location = &stored.location;
        let flags = stored.use_default_flags.unwrap_or_default();
        let pick = |use_default: bool, inherited: &PathBuf, own: &str| {
            if use_default {
                inherited.clone()
            } else {
                location.join(own)
            }
        };

        Self {
            id: profile_id(location),
            name: stored.name.clone(),
            location: location.clone(),
            is_default: false,
            use_default_flags: stored.use_default_flags,
            global_storage_home: pick(flags.ui_state, &default.global_storage_home, "globalStorage"),
            settings_resource: pick(flags.settings, &default.settings_resource, "settings.json"),
            keybindings_resource: pick(
                flags.keybindings,
                &default.keybindings_resource,
                "keybindings.json",
            ),
            tasks_resource: pick(flags.tasks, &default.tasks_resource, "tasks.json"),
            snippets_home: pick(flags.snippets, &default.snippets_home, "snippets"),
            extensions_resource: if flags.extensions {
                default.extensions_resource.clone()
            } else {
                Some(location.join("extensions.json"))
            },
        }
    }

    pub fn to_stored(&self) -> StoredProfile {
        StoredProfile {
            name: self.name.clone(),
            location: self.location.clone(),
            use_default_flags: self.use_default_flags,
        }
    }
}

/// Named profiles are identified by their folder name.
fn profile_id(location: &Path) -> String {
    location
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| location.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(flags: Option<UseDefaultFlags>) -> StoredProfile {
        StoredProfile {
            name: "Work".to_string(),
            location: PathBuf::from("/data/profiles/abc123"),
            use_default_flags: flags,
        }
    }

    #[test]
    fn named_profile_owns_its_resources() {
        let default = Profile::default_at("Default", Path::new("/data"));
        let profile = Profile::from_stored(&stored(None), &default);

        assert_eq!(profile.id, "abc123");
        assert!(!profile.is_default);
        assert_eq!(
            profile.settings_resource,
            PathBuf::from("/data/profiles/abc123/settings.json")
        );
        assert_eq!(
            profile.extensions_resource,
            Some(PathBuf::from("/data/profiles/abc123/extensions.json"))
        );
    }

    #[test]
    fn flagged_resources_come_from_default() {
        let default = Profile::default_at("Default", Path::new("/data"));
        let flags = UseDefaultFlags {
            settings: true,
            extensions: true,
            ..Default::default()
        };
        let profile = Profile::from_stored(&stored(Some(flags)), &default);

        assert_eq!(profile.settings_resource, default.settings_resource);
        assert_eq!(profile.extensions_resource, None);
        assert_eq!(
            profile.tasks_resource,
            PathBuf::from("/data/profiles/abc123/tasks.json")
        );
    }

    #[test]
    fn parses_flag_lists() {
        let flags = UseDefaultFlags::parse_list("settings, uiState").unwrap();
        assert!(flags.settings && flags.ui_state);
        assert_eq!(flags.enabled(), vec!["settings", "uiState"]);
        assert!(UseDefaultFlags::parse_list("colors").is_none());
        assert!(UseDefaultFlags::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn stored_profile_json_uses_camel_case() {
        let flags = UseDefaultFlags {
            ui_state: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&stored(Some(flags))).unwrap();
        assert!(json.contains("\"useDefaultFlags\""));
        assert!(json.contains("\"uiState\":true"));
    }
}
