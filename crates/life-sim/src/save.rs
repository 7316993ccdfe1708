//! Saved games on disk.
//!
//! A save is the whole [`GameState`] as pretty-printed JSON. Writes go to a
//! sibling `.tmp` file first and are renamed into place, so a crash mid-write
//! leaves the previous save intact.

use life_events::GameState;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing a save file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not a valid game: {0}")]
    Json(#[from] serde_json::Error),
}

/// A save slot at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes the state, replacing any previous save.
    pub fn save(&self, state: &GameState) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        serde_json::to_writer_pretty(&mut writer, state)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), day = state.days_passed, "game saved");
        Ok(())
    }

    /// Reads the saved state.
    pub fn load(&self) -> Result<GameState, SaveError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let state: GameState = serde_json::from_reader(reader)?;
        tracing::debug!(path = %self.path.display(), day = state.days_passed, "game loaded");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_events::fixtures;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("agnes.json"));
        assert!(!store.exists());

        let state = fixtures::sample_state();
        store.save(&state).unwrap();
        assert!(store.exists());
        assert!(!dir.path().join("agnes.tmp").exists());
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("saves/slot1/game.json"));
        store.save(&fixtures::fresh_state("Wat")).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("game.json"));

        let mut state = fixtures::fresh_state("Wat");
        store.save(&state).unwrap();
        state.days_passed = 40;
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap().days_passed, 40);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("nope.json"));
        assert!(matches!(store.load(), Err(SaveError::Io(_))));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(SaveStore::new(path).load(), Err(SaveError::Json(_))));
    }
}
