use super::event::{DidChangeProfilesEvent, Emitter, JoinableProfileEvent, ListenerId};
use super::{
    Profile, StoredProfile, UseDefaultFlags, WorkspaceId, ASSOCIATIONS_KEY, PROFILES_DIRNAME,
    PROFILES_KEY,
};
use crate::error::{Result, WorkbenchError};
use crate::store::{load_json, save_json, StorageBackend};
use log::{debug, error, info};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

type Associations = BTreeMap<String, PathBuf>;

/// Create, update, remove and look up profiles held in a [`StorageBackend`].
///
/// Nothing is cached: every read goes back to the backend.
pub struct ProfileService<B: StorageBackend> {
    backend: B,
    profiles_home: PathBuf,
    default_profile: Profile,
    will_create: Emitter<JoinableProfileEvent>,
    will_remove: Emitter<JoinableProfileEvent>,
    did_change: Emitter<DidChangeProfilesEvent>,
}

impl<B: StorageBackend> ProfileService<B> {
    pub fn new(backend: B, data_root: &Path, default_name: &str) -> Self {
        Self {
            backend,
            profiles_home: data_root.join(PROFILES_DIRNAME),
            default_profile: Profile::default_at(default_name, data_root),
            will_create: Emitter::default(),
            will_remove: Emitter::default(),
            did_change: Emitter::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn profiles_home(&self) -> &Path {
        &self.profiles_home
    }

    pub fn default_profile(&self) -> &Profile {
        &self.default_profile
    }

    /// Default profile first, then stored profiles in creation order.
    pub fn profiles(&self) -> Result<Vec<Profile>> {
        let mut all = vec![self.default_profile.clone()];
        all.extend(
            self.stored_profiles()?
                .iter()
                .map(|stored| Profile::from_stored(stored, &self.default_profile)),
        );
        Ok(all)
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Profile>> {
        Ok(self.profiles()?.into_iter().find(|p| p.name == name))
    }

    /// Whether a stored (non-default) profile is called `name`.
    pub fn named_profile_exists(&self, name: &str) -> Result<bool> {
        Ok(self.stored_profiles()?.iter().any(|p| p.name == name))
    }

    pub fn create_profile(
        &self,
        name: &str,
        flags: UseDefaultFlags,
        workspace: Option<&WorkspaceId>,
    ) -> Result<Profile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkbenchError::Api("Profile name cannot be empty".into()));
        }
        if self.name_taken(name, None)? {
            return Err(WorkbenchError::ProfileExists(name.to_string()));
        }

        let stored = StoredProfile {
            name: name.to_string(),
            location: self.profiles_home.join(Uuid::new_v4().simple().to_string()),
            use_default_flags: (!flags.is_empty()).then_some(flags),
        };
        let profile = Profile::from_stored(&stored, &self.default_profile);
        self.backend.create_folder(&profile.location)?;

        let event = JoinableProfileEvent::new(profile.clone());
        self.will_create.fire(&event);
        let committed = event.settle().and_then(|()| {
            let mut profiles = self.stored_profiles()?;
            profiles.push(stored);
            self.save_stored_profiles(&profiles)
        });
        if let Err(e) = committed {
            if let Err(cleanup) = self.backend.remove_folder(&profile.location) {
                error!(
                    "failed to clean up {} after aborted create: {}",
                    profile.location.display(),
                    cleanup
                );
            }
            return Err(e);
        }
        info!("created profile '{}' at {}", profile.name, profile.location.display());

        self.fire_changed(vec![profile.clone()], Vec::new(), Vec::new());

        if let Some(workspace) = workspace {
            self.set_profile_for_workspace(&profile, workspace)?;
        }
        Ok(profile)
    }

    /// Rename a profile and/or replace its flags.
    pub fn update_profile(
        &self,
        profile: &Profile,
        name: Option<&str>,
        flags: Option<UseDefaultFlags>,
    ) -> Result<Profile> {
        if profile.is_default {
            return Err(WorkbenchError::DefaultProfileNotUpdatable);
        }

        let mut profiles = self.stored_profiles()?;
        let index = self.position_of(&profiles, profile)?;

        if let Some(name) = name.map(str::trim) {
            if name.is_empty() {
                return Err(WorkbenchError::Api("Profile name cannot be empty".into()));
            }
            if self.name_taken(name, Some(&profile.location))? {
                return Err(WorkbenchError::ProfileExists(name.to_string()));
            }
            profiles[index].name = name.to_string();
        }
        if let Some(flags) = flags {
            profiles[index].use_default_flags = (!flags.is_empty()).then_some(flags);
        }

        self.save_stored_profiles(&profiles)?;
        let updated = Profile::from_stored(&profiles[index], &self.default_profile);
        info!("updated profile '{}'", updated.name);

        self.fire_changed(Vec::new(), Vec::new(), vec![updated.clone()]);
        Ok(updated)
    }

    pub fn remove_profile(&self, profile: &Profile) -> Result<()> {
        if profile.is_default {
            return Err(WorkbenchError::DefaultProfileNotRemovable);
        }

        let profiles = self.stored_profiles()?;
        let index = self.position_of(&profiles, profile)?;
        let removed = Profile::from_stored(&profiles[index], &self.default_profile);

        let event = JoinableProfileEvent::new(removed.clone());
        self.will_remove.fire(&event);
        event.settle()?;

        // Re-read: joined work may have changed the store.
        let mut profiles = self.stored_profiles()?;
        profiles.retain(|p| p.location != removed.location);
        self.save_stored_profiles(&profiles)?;
        info!("removed profile '{}'", removed.name);

        // Past this point the removal is committed and nothing below fails it.
        // A stale association resolves to the default profile.
        let dropped = self.associations().and_then(|mut associations| {
            associations.retain(|_, location| *location != removed.location);
            self.save_associations(&associations)
        });
        if let Err(e) = dropped {
            error!("failed to drop workspaces of '{}': {}", removed.name, e);
        }

        // With only the default profile left the whole profiles folder goes.
        let target = if profiles.is_empty() {
            &self.profiles_home
        } else {
            &removed.location
        };
        if let Err(e) = self.backend.remove_folder(target) {
            error!("failed to remove {}: {}", target.display(), e);
        }

        self.fire_changed(Vec::new(), vec![removed], Vec::new());
        Ok(())
    }

    pub fn set_profile_for_workspace(&self, profile: &Profile, workspace: &WorkspaceId) -> Result<()> {
        let known = self
            .profiles()?
            .into_iter()
            .find(|p| p.location == profile.location)
            .ok_or_else(|| WorkbenchError::ProfileNotFound(profile.name.clone()))?;

        let mut associations = self.associations()?;
        if known.is_default {
            associations.remove(workspace.as_str());
        } else {
            associations.insert(workspace.to_string(), known.location.clone());
        }
        self.save_associations(&associations)?;
        debug!("workspace {} now uses profile '{}'", workspace, known.name);
        Ok(())
    }

    /// Returns whether the workspace had an association.
    pub fn unset_workspace(&self, workspace: &WorkspaceId) -> Result<bool> {
        let mut associations = self.associations()?;
        let existed = associations.remove(workspace.as_str()).is_some();
        if existed {
            self.save_associations(&associations)?;
        }
        Ok(existed)
    }

    pub fn reset_workspaces(&self) -> Result<()> {
        self.save_associations(&Associations::new())
    }

    /// The workspace's profile, or the default profile when it has none.
    pub fn profile_for_workspace(&self, workspace: &WorkspaceId) -> Result<Profile> {
        let associations = self.associations()?;
        let Some(location) = associations.get(workspace.as_str()) else {
            return Ok(self.default_profile.clone());
        };
        Ok(self
            .profiles()?
            .into_iter()
            .find(|p| &p.location == location)
            .unwrap_or_else(|| self.default_profile.clone()))
    }

    pub fn workspaces_for(&self, profile: &Profile) -> Result<Vec<WorkspaceId>> {
        Ok(self
            .associations()?
            .into_iter()
            .filter(|(_, location)| *location == profile.location)
            .map(|(workspace, _)| WorkspaceId::new(workspace))
            .collect())
    }

    pub fn on_will_create_profile(
        &mut self,
        listener: impl Fn(&JoinableProfileEvent) + 'static,
    ) -> ListenerId {
        self.will_create.subscribe(listener)
    }

    pub fn on_will_remove_profile(
        &mut self,
        listener: impl Fn(&JoinableProfileEvent) + 'static,
    ) -> ListenerId {
        self.will_remove.subscribe(listener)
    }

    pub fn on_did_change_profiles(
        &mut self,
        listener: impl Fn(&DidChangeProfilesEvent) + 'static,
    ) -> ListenerId {
        self.did_change.subscribe(listener)
    }

    /// Unsubscribe a listener from whichever event it was registered on.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.will_create.unsubscribe(id)
            || self.will_remove.unsubscribe(id)
            || self.did_change.unsubscribe(id)
    }

    fn stored_profiles(&self) -> Result<Vec<StoredProfile>> {
        load_json(&self.backend, PROFILES_KEY)
    }

    fn save_stored_profiles(&self, profiles: &[StoredProfile]) -> Result<()> {
        save_json(&self.backend, PROFILES_KEY, &profiles, profiles.is_empty())
    }

    fn associations(&self) -> Result<Associations> {
        load_json(&self.backend, ASSOCIATIONS_KEY)
    }

    fn save_associations(&self, associations: &Associations) -> Result<()> {
        save_json(
            &self.backend,
            ASSOCIATIONS_KEY,
            associations,
            associations.is_empty(),
        )
    }

    fn position_of(&self, profiles: &[StoredProfile], profile: &Profile) -> Result<usize> {
        profiles
            .iter()
            .position(|p| p.location == profile.location)
            .ok_or_else(|| WorkbenchError::ProfileNotFound(profile.name.clone()))
    }

    fn name_taken(&self, name: &str, except: Option<&Path>) -> Result<bool> {
        if name == self.default_profile.name {
            return Ok(true);
        }
        Ok(self
            .stored_profiles()?
            .iter()
            .any(|p| p.name == name && Some(p.location.as_path()) != except))
    }

    /// Notify did-change listeners of a committed change. A failed re-read
    /// is logged and the notification skipped.
    fn fire_changed(&self, added: Vec<Profile>, removed: Vec<Profile>, updated: Vec<Profile>) {
        if self.did_change.is_empty() {
            return;
        }
        let all = match self.profiles() {
            Ok(all) => all,
            Err(e) => {
                error!("failed to read profiles for change notification: {}", e);
                return;
            }
        };
        self.did_change.fire(&DidChangeProfilesEvent {
            added,
            removed,
            updated,
            all,
        });
    }
}
