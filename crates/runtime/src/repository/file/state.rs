//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use menu_core::PlayerState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// Stores the player state as one pretty-printed JSON document.
///
/// Writes go to a sibling `.tmp` file that is renamed over the target, so a
/// crash mid-save leaves the previous document intact. Fields missing from
/// an older document load as their defaults.
#[derive(Debug, Clone)]
pub struct FileStateRepository {
    path: PathBuf,
}

impl FileStateRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, state: &PlayerState) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, json)?;
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::warn!("Failed to remove {}: {cleanup}", temp_path.display());
            }
            return Err(err.into());
        }

        tracing::debug!("Saved player state to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<PlayerState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let state: PlayerState = serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::CorruptedData(format!("{}: {e}", self.path.display()))
        })?;

        tracing::debug!("Loaded player state from {}", self.path.display());
        Ok(Some(state))
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("Deleted {}", self.path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use menu_core::{Currencies, Settings};

    use super::*;

    fn sample() -> PlayerState {
        PlayerState {
            currencies: Currencies::new(450, 12),
            settings: Settings {
                username: "Ada".into(),
                ..Settings::default()
            },
            ..PlayerState::default()
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path().join("nested/savegame.json"));

        assert!(repo.load().unwrap().is_none());
        repo.save(&sample()).unwrap();

        assert!(repo.exists());
        assert!(!repo.temp_path().exists());
        assert_eq!(repo.load().unwrap(), Some(sample()));
    }

    #[test]
    fn new_game_survives_round_trip() {
        let data = menu_content::builtin::catalog().unwrap();
        let oracles = crate::oracle::OracleManager::from_catalog_data(data);
        let state = PlayerState::new_game(&oracles.as_catalog(), &Default::default());

        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path().join("savegame.json"));
        repo.save(&state).unwrap();

        assert_eq!(repo.load().unwrap(), Some(state));
    }

    #[test]
    fn corrupt_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savegame.json");
        fs::write(&path, b"{ not json").unwrap();

        let err = FileStateRepository::new(&path).load().unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savegame.json");
        fs::write(&path, br#"{ "currencies": { "gold": 7 } }"#).unwrap();

        let state = FileStateRepository::new(&path).load().unwrap().unwrap();
        assert_eq!(state.currencies, Currencies::new(7, 0));
        assert_eq!(state.settings, Settings::default());
        assert!(state.characters.is_empty());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savegame.json");
        // A non-empty directory at the target makes the rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"").unwrap();
        let repo = FileStateRepository::new(&path);

        assert!(matches!(repo.save(&sample()), Err(RepositoryError::Io(_))));
        assert!(!repo.temp_path().exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn delete_removes_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path().join("savegame.json"));
        repo.save(&sample()).unwrap();

        repo.delete().unwrap();
        assert!(!repo.exists());
        repo.delete().unwrap();
    }
}
