use crate::commands::{CmdMessage, CmdResult, WorkbenchPaths};
use crate::config::{ConfigKey, WorkbenchConfig};
use crate::error::{Result, WorkbenchError};
use crate::profiles::ProfileService;
use crate::store::StorageBackend;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(ConfigKey),
    Set(ConfigKey, String),
}

pub fn run<B: StorageBackend>(
    paths: &WorkbenchPaths,
    profiles: &ProfileService<B>,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut config = WorkbenchConfig::load(&paths.data_root)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            result.add_message(CmdMessage::info(format!(
                "{} = {}",
                key.name(),
                config.get(key)
            )));
        }
        ConfigAction::Set(key, value) => {
            config.set(key, &value)?;
            // The default profile's name must stay unique among profiles.
            if key == ConfigKey::DefaultProfileName
                && profiles.named_profile_exists(&config.default_profile_name)?
            {
                return Err(WorkbenchError::ProfileExists(config.default_profile_name));
            }
            config.save(&paths.data_root)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key.name(),
                config.get(key)
            )));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::UseDefaultFlags;
    use crate::store::mem_backend::MemBackend;
    use tempfile::TempDir;

    fn setup() -> (TempDir, WorkbenchPaths, ProfileService<MemBackend>) {
        let dir = TempDir::new().unwrap();
        let paths = WorkbenchPaths::new(dir.path().to_path_buf());
        let profiles = ProfileService::new(MemBackend::new(), dir.path(), "Default");
        (dir, paths, profiles)
    }

    #[test]
    fn set_persists_value() {
        let (_dir, paths, profiles) = setup();

        run(&paths, &profiles, ConfigAction::Set(ConfigKey::TocDepth, "2".into())).unwrap();
        let shown = run(&paths, &profiles, ConfigAction::ShowAll).unwrap();

        assert_eq!(shown.config.unwrap().toc_depth, 2);
    }

    #[test]
    fn invalid_value_is_not_saved() {
        let (dir, paths, profiles) = setup();

        let action = ConfigAction::Set(ConfigKey::TocDepth, "9".into());
        assert!(run(&paths, &profiles, action).is_err());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn default_profile_name_cannot_shadow_existing_profile() {
        let (dir, paths, profiles) = setup();
        profiles
            .create_profile("Work", UseDefaultFlags::default(), None)
            .unwrap();

        let action = ConfigAction::Set(ConfigKey::DefaultProfileName, " Work ".into());
        let err = run(&paths, &profiles, action).unwrap_err();

        assert!(matches!(err, WorkbenchError::ProfileExists(ref n) if n == "Work"));
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn default_profile_name_can_take_a_free_name() {
        let (_dir, paths, profiles) = setup();
        profiles
            .create_profile("Work", UseDefaultFlags::default(), None)
            .unwrap();

        let action = ConfigAction::Set(ConfigKey::DefaultProfileName, "Main".into());
        let result = run(&paths, &profiles, action).unwrap();

        assert_eq!(result.config.unwrap().default_profile_name, "Main");
    }
}
