use crate::commands::{CmdMessage, CmdResult, ProfileListing};
use crate::error::{Result, WorkbenchError};
use crate::profiles::{Profile, ProfileService, UseDefaultFlags, WorkspaceId};
use crate::store::StorageBackend;

pub fn list<B: StorageBackend>(service: &ProfileService<B>) -> Result<CmdResult> {
    let listings = service
        .profiles()?
        .into_iter()
        .map(|profile| listing(service, profile))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_profiles(listings))
}

pub fn create<B: StorageBackend>(
    service: &ProfileService<B>,
    name: &str,
    flags: UseDefaultFlags,
    workspace: Option<&WorkspaceId>,
) -> Result<CmdResult> {
    let profile = service.create_profile(name, flags, workspace)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Profile created: {}",
        profile.name
    )));
    if let Some(workspace) = workspace {
        result.add_message(CmdMessage::info(format!("Workspace {} now uses it", workspace)));
    }
    Ok(result.with_profiles(vec![listing(service, profile)?]))
}

pub fn remove<B: StorageBackend>(service: &ProfileService<B>, name: &str) -> Result<CmdResult> {
    let profile = resolve(service, name)?;
    service.remove_profile(&profile)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Profile removed: {}",
        profile.name
    )));
    Ok(result)
}

pub fn rename<B: StorageBackend>(
    service: &ProfileService<B>,
    name: &str,
    new_name: &str,
) -> Result<CmdResult> {
    let profile = resolve(service, name)?;
    let updated = service.update_profile(&profile, Some(new_name), None)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Profile renamed: {} -> {}",
        profile.name, updated.name
    )));
    Ok(result.with_profiles(vec![listing(service, updated)?]))
}

pub fn set_flags<B: StorageBackend>(
    service: &ProfileService<B>,
    name: &str,
    flags: UseDefaultFlags,
) -> Result<CmdResult> {
    let profile = resolve(service, name)?;
    let updated = service.update_profile(&profile, None, Some(flags))?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Profile updated: {}",
        updated.name
    )));
    Ok(result.with_profiles(vec![listing(service, updated)?]))
}

pub fn use_for_workspace<B: StorageBackend>(
    service: &ProfileService<B>,
    name: &str,
    workspace: &WorkspaceId,
) -> Result<CmdResult> {
    let profile = resolve(service, name)?;
    service.set_profile_for_workspace(&profile, workspace)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Workspace {} now uses profile {}",
        workspace, profile.name
    )));
    Ok(result)
}

pub fn unset<B: StorageBackend>(
    service: &ProfileService<B>,
    workspace: &WorkspaceId,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if service.unset_workspace(workspace)? {
        result.add_message(CmdMessage::success(format!(
            "Workspace {} uses the default profile again",
            workspace
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Workspace {} had no profile association",
            workspace
        )));
    }
    Ok(result)
}

pub fn reset<B: StorageBackend>(service: &ProfileService<B>) -> Result<CmdResult> {
    service.reset_workspaces()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("All workspace associations cleared"));
    Ok(result)
}

/// The profile a workspace resolves to.
pub fn show<B: StorageBackend>(
    service: &ProfileService<B>,
    workspace: &WorkspaceId,
) -> Result<CmdResult> {
    let profile = service.profile_for_workspace(workspace)?;
    Ok(CmdResult::default().with_profiles(vec![listing(service, profile)?]))
}

fn resolve<B: StorageBackend>(service: &ProfileService<B>, name: &str) -> Result<Profile> {
    service
        .find_by_name(name)?
        .ok_or_else(|| WorkbenchError::ProfileNotFound(name.to_string()))
}

fn listing<B: StorageBackend>(service: &ProfileService<B>, profile: Profile) -> Result<ProfileListing> {
    let workspaces = if profile.is_default {
        Vec::new()
    } else {
        service.workspaces_for(&profile)?
    };
    Ok(ProfileListing {
        profile,
        workspaces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::path::Path;

    fn service() -> ProfileService<MemBackend> {
        ProfileService::new(MemBackend::new(), Path::new("/data"), "Default")
    }

    #[test]
    fn list_includes_workspaces() {
        let svc = service();
        let ws = WorkspaceId::from("ws");
        create(&svc, "Work", UseDefaultFlags::default(), Some(&ws)).unwrap();

        let result = list(&svc).unwrap();
        assert_eq!(result.profiles.len(), 2);
        assert_eq!(result.profiles[1].workspaces, vec![ws]);
    }

    #[test]
    fn remove_by_unknown_name_fails() {
        let svc = service();
        assert!(matches!(
            remove(&svc, "Nope"),
            Err(WorkbenchError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn remove_default_by_name_fails() {
        let svc = service();
        assert!(matches!(
            remove(&svc, "Default"),
            Err(WorkbenchError::DefaultProfileNotRemovable)
        ));
    }

    #[test]
    fn rename_then_show_through_workspace() {
        let svc = service();
        let ws = WorkspaceId::from("ws");
        create(&svc, "Work", UseDefaultFlags::default(), None).unwrap();
        use_for_workspace(&svc, "Work", &ws).unwrap();
        rename(&svc, "Work", "Office").unwrap();

        let shown = show(&svc, &ws).unwrap();
        assert_eq!(shown.profiles[0].profile.name, "Office");
    }

    #[test]
    fn unset_reports_whether_anything_changed() {
        let svc = service();
        let ws = WorkspaceId::from("ws");
        create(&svc, "Work", UseDefaultFlags::default(), Some(&ws)).unwrap();

        let first = unset(&svc, &ws).unwrap();
        let second = unset(&svc, &ws).unwrap();
        assert!(matches!(first.messages[0].level, crate::commands::MessageLevel::Success));
        assert!(matches!(second.messages[0].level, crate::commands::MessageLevel::Info));
    }
}
