//! services/portal/src/adapters/settings_file.rs
//!
//! A `SettingsStore` that keeps each settings section as one JSON document on
//! disk, named after its storage key (e.g. `academicSettings.json`).

use async_trait::async_trait;
use campus_core::ports::{PortError, PortResult, SettingsStore};
use campus_core::settings::SettingsKey;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct FileSettingsStore {
    dir: PathBuf,
}

impl FileSettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: SettingsKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    /// A missing file is not an error: the section has simply never been saved.
    async fn load(&self, key: SettingsKey) -> PortResult<Option<serde_json::Value>> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored {} at {}", key, path.display());
                return Ok(None);
            }
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring {}: not valid JSON ({})", path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(&self, key: SettingsKey, value: &serde_json::Value) -> PortResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let body = serde_json::to_vec_pretty(value)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let path = self.path_for(key);
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        info!("Saved {} to {}", key, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::settings::{load_or_default, AcademicSettings};
    use serde_json::json;

    #[tokio::test]
    async fn unsaved_sections_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path());
        assert!(store.load(SettingsKey::Security).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saved_sections_are_read_back_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("nested"));
        let value = json!({ "currentSemester": "Odd", "gradingSystem": "percentage" });

        store.save(SettingsKey::Academic, &value).await.unwrap();

        assert!(dir.path().join("nested/academicSettings.json").exists());
        assert_eq!(store.load(SettingsKey::Academic).await.unwrap(), Some(value));
        assert!(store.load(SettingsKey::Institution).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_files_read_as_unsaved() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notificationSettings.json"), "{not json").unwrap();
        let store = FileSettingsStore::new(dir.path());
        assert!(store.load(SettingsKey::Notification).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn typed_loading_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path());
        let academic: AcademicSettings = load_or_default(&store, SettingsKey::Academic)
            .await
            .unwrap();
        assert_eq!(academic, AcademicSettings::default());
    }
}
