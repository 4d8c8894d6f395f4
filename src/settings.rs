use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::stores::{DEFAULT_BREAK_DURATION_MS, DEFAULT_WORK_DURATION_LIMIT_MS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub work_duration_limit_ms: u64,
    pub break_duration_ms: u64,
    pub api_base_url: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            work_duration_limit_ms: DEFAULT_WORK_DURATION_LIMIT_MS,
            break_duration_ms: DEFAULT_BREAK_DURATION_MS,
            api_base_url: "http://localhost:9000/api/v1".into(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> UserSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update(&self, settings: UserSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("focustrack-settings-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = SettingsStore::new(temp_settings_path("missing")).unwrap();
        assert_eq!(store.settings(), UserSettings::default());
        assert_eq!(store.settings().work_duration_limit_ms, 50 * 60 * 1000);
        assert_eq!(store.settings().break_duration_ms, 10 * 60 * 1000);
    }

    #[test]
    fn updates_persist_across_instances() {
        let path = temp_settings_path("roundtrip");
        let store = SettingsStore::new(path.clone()).unwrap();

        let mut settings = store.settings();
        settings.work_duration_limit_ms = 25 * 60 * 1000;
        store.update(settings.clone()).unwrap();

        let reloaded = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(reloaded.settings(), settings);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = temp_settings_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(store.settings(), UserSettings::default());
        let _ = fs::remove_file(path);
    }
}
