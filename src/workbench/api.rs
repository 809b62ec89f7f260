//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every workbench operation, whatever client drives it.
//!
//! The facade dispatches to `commands/*.rs`, parses loose inputs (names,
//! workspace ids, flag lists) into domain types, and returns
//! `Result<CmdResult>`. It does no printing and holds no business rules.
//!
//! `WorkbenchApi<B: StorageBackend>` is generic over the storage backend:
//! `FsBackend` in production, `MemBackend` in tests.

use crate::commands;
use crate::config::WorkbenchConfig;
use crate::error::{Result, WorkbenchError};
use crate::profiles::{ProfileService, UseDefaultFlags, WorkspaceId};
use crate::store::StorageBackend;
use std::path::Path;

pub struct WorkbenchApi<B: StorageBackend> {
    profiles: ProfileService<B>,
    paths: commands::WorkbenchPaths,
    config: WorkbenchConfig,
}

impl<B: StorageBackend> WorkbenchApi<B> {
    pub fn new(backend: B, paths: commands::WorkbenchPaths, config: WorkbenchConfig) -> Self {
        let profiles = ProfileService::new(backend, &paths.data_root, &config.default_profile_name);
        Self {
            profiles,
            paths,
            config,
        }
    }

    pub fn outline(&self, path: &Path, flat: bool) -> Result<commands::CmdResult> {
        commands::outline::run(path, flat)
    }

    /// Render a table of contents; `depth` falls back to the configured depth.
    pub fn toc(&self, path: &Path, depth: Option<usize>) -> Result<commands::CmdResult> {
        commands::toc::run(path, depth.unwrap_or(self.config.toc_depth))
    }

    pub fn lookup(&self, path: &Path, fragment: &str) -> Result<commands::CmdResult> {
        commands::toc::lookup(path, fragment)
    }

    pub fn list_profiles(&self) -> Result<commands::CmdResult> {
        commands::profile::list(&self.profiles)
    }

    pub fn create_profile(
        &self,
        name: &str,
        use_default: Option<&str>,
        workspace: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let flags = parse_flags(use_default)?;
        let workspace = workspace.map(WorkspaceId::from);
        commands::profile::create(&self.profiles, name, flags, workspace.as_ref())
    }

    pub fn remove_profile(&self, name: &str) -> Result<commands::CmdResult> {
        commands::profile::remove(&self.profiles, name)
    }

    pub fn rename_profile(&self, name: &str, new_name: &str) -> Result<commands::CmdResult> {
        commands::profile::rename(&self.profiles, name, new_name)
    }

    pub fn set_profile_flags(&self, name: &str, use_default: &str) -> Result<commands::CmdResult> {
        let flags = parse_flags(Some(use_default))?;
        commands::profile::set_flags(&self.profiles, name, flags)
    }

    pub fn use_profile(&self, name: &str, workspace: &str) -> Result<commands::CmdResult> {
        commands::profile::use_for_workspace(&self.profiles, name, &WorkspaceId::from(workspace))
    }

    pub fn unset_workspace(&self, workspace: &str) -> Result<commands::CmdResult> {
        commands::profile::unset(&self.profiles, &WorkspaceId::from(workspace))
    }

    pub fn reset_workspaces(&self) -> Result<commands::CmdResult> {
        commands::profile::reset(&self.profiles)
    }

    pub fn show_workspace(&self, workspace: &str) -> Result<commands::CmdResult> {
        commands::profile::show(&self.profiles, &WorkspaceId::from(workspace))
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, &self.profiles, action)
    }

    pub fn profiles(&self) -> &ProfileService<B> {
        &self.profiles
    }

    /// Mutable access for registering lifecycle listeners.
    pub fn profiles_mut(&mut self) -> &mut ProfileService<B> {
        &mut self.profiles
    }

    pub fn paths(&self) -> &commands::WorkbenchPaths {
        &self.paths
    }
}

fn parse_flags(list: Option<&str>) -> Result<UseDefaultFlags> {
    match list {
        None => Ok(UseDefaultFlags::default()),
        Some(list) => UseDefaultFlags::parse_list(list).ok_or_else(|| {
            WorkbenchError::Api(format!(
                "Unknown resource in '{}'; expected any of: {}",
                list,
                UseDefaultFlags::NAMES.join(", ")
            ))
        }),
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, ProfileListing, WorkbenchPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::path::PathBuf;

    fn api() -> WorkbenchApi<MemBackend> {
        WorkbenchApi::new(
            MemBackend::new(),
            WorkbenchPaths::new(PathBuf::from("/data")),
            WorkbenchConfig::default(),
        )
    }

    #[test]
    fn create_parses_flag_list() {
        let api = api();
        let result = api
            .create_profile("Work", Some("settings,tasks"), None)
            .unwrap();
        let flags = result.profiles[0].profile.use_default_flags.unwrap();
        assert!(flags.settings && flags.tasks && !flags.snippets);
    }

    #[test]
    fn create_rejects_unknown_flag() {
        let api = api();
        let err = api.create_profile("Work", Some("themes"), None).unwrap_err();
        assert!(matches!(err, WorkbenchError::Api(_)));
        assert_eq!(api.list_profiles().unwrap().profiles.len(), 1);
    }

    #[test]
    fn default_profile_uses_configured_name() {
        let config = WorkbenchConfig {
            default_profile_name: "Main".into(),
            ..Default::default()
        };
        let api = WorkbenchApi::new(
            MemBackend::new(),
            WorkbenchPaths::new(PathBuf::from("/data")),
            config,
        );
        assert_eq!(api.profiles().default_profile().name, "Main");
    }

    #[test]
    fn listeners_registered_through_api_fire() {
        let mut api = api();
        api.profiles_mut().on_will_create_profile(|event| {
            event.join(async { Err(WorkbenchError::Participant("locked".into())) });
        });
        assert!(api.create_profile("Work", None, None).is_err());
    }

    #[test]
    fn workspace_round_trip() {
        let api = api();
        api.create_profile("Work", None, None).unwrap();
        api.use_profile("Work", "ws").unwrap();
        assert_eq!(
            api.show_workspace("ws").unwrap().profiles[0].profile.name,
            "Work"
        );
        api.reset_workspaces().unwrap();
        assert!(api.show_workspace("ws").unwrap().profiles[0].profile.is_default);
    }
}
