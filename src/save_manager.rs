//! Save persistence: a JSON document on disk, periodic backups, and a
//! write debouncer so rapid state changes coalesce into one save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::constants::{BACKUP_INTERVAL_MS, JOURNAL_TRUNCATE_LEN, SAVE_DEBOUNCE_MS};
use crate::game_state::{is_valid_game_state, GameState};
use crate::migration::migrate_value;

pub const SAVE_FILE: &str = "lifecraft_save.json";
pub const BACKUP_FILE: &str = "lifecraft_save.backup.json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("corrupt save: {0}")]
    Corrupt(String),
}

pub struct SaveManager {
    dir: PathBuf,
    last_backup_at: i64,
}

impl SaveManager {
    /// Opens (and creates if needed) the save directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            last_backup_at: 0,
        })
    }

    /// Platform data directory for the game, when one can be determined.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "LifeCraft").map(|d| d.data_dir().to_path_buf())
    }

    pub fn save_path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(BACKUP_FILE)
    }

    fn write_atomically(&self, path: &Path, contents: &str) -> io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)
    }

    /// Writes the save. A first failed write retries once with the journal
    /// trimmed down, which rescues saves that outgrew the device. Failures
    /// never surface past this point; the in-memory state stays
    /// authoritative and the next flush tries again.
    pub fn save(&self, state: &GameState) {
        let serialized = match serde_json::to_string(state) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!(error = %err, "save state refused to serialize");
                return;
            }
        };
        if let Err(first) = self.write_atomically(&self.save_path(), &serialized) {
            warn!(error = %first, "save failed, retrying with trimmed journal");
            let mut trimmed = state.clone();
            if let Some(character) = trimmed.character.as_mut() {
                let keep = JOURNAL_TRUNCATE_LEN / 5;
                let len = character.journal.len();
                if len > keep {
                    character.journal.drain(..len - keep);
                }
            }
            match serde_json::to_string(&trimmed) {
                Ok(serialized) => {
                    if let Err(err) = self.write_atomically(&self.save_path(), &serialized) {
                        error!(error = %err, "save failed twice");
                    }
                }
                Err(err) => error!(error = %err, "save state refused to serialize"),
            }
        }
    }

    fn load_document(path: &Path) -> Result<Option<GameState>, SaveError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| SaveError::Corrupt(format!("not valid JSON: {e}")))?;
        let migrated = migrate_value(value);
        if !is_valid_game_state(&migrated) {
            return Err(SaveError::Corrupt("failed structural validation".into()));
        }
        let state = serde_json::from_value(migrated)
            .map_err(|e| SaveError::Corrupt(format!("unreadable after migration: {e}")))?;
        Ok(Some(state))
    }

    /// Loads and migrates the save. A corrupt primary document falls back
    /// to the last backup; `None` when no usable document exists.
    pub fn load(&self) -> Result<Option<GameState>, SaveError> {
        match Self::load_document(&self.save_path()) {
            Ok(state) => Ok(state),
            Err(SaveError::Corrupt(reason)) => {
                warn!(%reason, "primary save corrupt, trying the backup");
                match Self::load_document(&self.backup_path()) {
                    Ok(state) => Ok(state),
                    Err(SaveError::Corrupt(reason)) => {
                        warn!(%reason, "backup corrupt as well");
                        Ok(None)
                    }
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Loads the last backup instead of the primary save.
    pub fn restore_backup(&self) -> Result<Option<GameState>, SaveError> {
        Self::load_document(&self.backup_path())
    }

    /// Copies the current save aside at most once per backup interval.
    /// Returns whether a backup was taken.
    pub fn backup_if_due(&mut self, now: i64) -> Result<bool, SaveError> {
        if now - self.last_backup_at < BACKUP_INTERVAL_MS {
            return Ok(false);
        }
        if !self.save_path().exists() {
            return Ok(false);
        }
        fs::copy(self.save_path(), self.backup_path())?;
        self.last_backup_at = now;
        info!("save backed up");
        Ok(true)
    }

    /// The raw save document, for the player to carry elsewhere.
    pub fn export_save(&self) -> Result<Option<String>, SaveError> {
        if !self.save_path().exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(self.save_path())?))
    }

    /// Validates, migrates and installs a pasted save document.
    pub fn import_save(&self, contents: &str) -> Result<GameState, SaveError> {
        let value: Value = serde_json::from_str(contents)
            .map_err(|e| SaveError::Corrupt(format!("not valid JSON: {e}")))?;
        let migrated = migrate_value(value);
        if !is_valid_game_state(&migrated) {
            return Err(SaveError::Corrupt("failed structural validation".into()));
        }
        let state: GameState = serde_json::from_value(migrated)
            .map_err(|e| SaveError::Corrupt(format!("unreadable after migration: {e}")))?;
        self.save(&state);
        Ok(state)
    }
}

/// Collapses bursts of dirty-marks into one flush after a quiet delay.
#[derive(Debug, Default)]
pub struct DebouncedSave {
    dirty_since: Option<i64>,
}

impl DebouncedSave {
    /// Notes that the state changed. The earliest mark wins so a steady
    /// stream of changes cannot postpone the flush forever.
    pub fn mark_dirty(&mut self, now: i64) {
        self.dirty_since.get_or_insert(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    pub fn should_flush(&self, now: i64) -> bool {
        self.dirty_since
            .map(|since| now - since >= SAVE_DEBOUNCE_MS)
            .unwrap_or(false)
    }

    pub fn flushed(&mut self) {
        self.dirty_since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{ClassType, JournalEntry, Mood, Stats};
    use crate::game_state::create_character;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_state() -> GameState {
        create_character(
            &GameState::new_game(),
            "Ilya",
            ClassType::Warrior,
            Stats::new(4, 2, 0, 4),
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        assert!(manager.load().unwrap().is_none());

        let state = sample_state();
        manager.save(&state);
        let loaded = manager.load().unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_migrates_versionless_save() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        let legacy = json!({
            "character": {
                "name": "Ilya",
                "classType": "Warrior",
                "level": 3,
                "currentExp": 120,
                "stats": { "str": 16, "dex": 8, "int": 3, "vit": 13 },
                "hp": 80,
                "maxHp": 135,
                "gold": 420,
                "inventory": []
            }
        });
        fs::write(manager.save_path(), legacy.to_string()).unwrap();
        let loaded = manager.load().unwrap().unwrap();
        assert_eq!(loaded.version, "1.1");
        let character = loaded.character.unwrap();
        assert_eq!(character.level, 3);
        assert_eq!(character.honesty, 100);
    }

    #[test]
    fn test_corrupt_save_falls_back_to_backup() {
        let dir = TempDir::new().unwrap();
        let mut manager = SaveManager::new(dir.path()).unwrap();
        let state = sample_state();
        manager.save(&state);
        assert!(manager.backup_if_due(BACKUP_INTERVAL_MS).unwrap());

        fs::write(manager.save_path(), "not json at all").unwrap();
        let recovered = manager.load().unwrap().unwrap();
        assert_eq!(recovered, state);

        // A characterless document is as unusable as bad JSON
        fs::write(manager.save_path(), "{}").unwrap();
        assert_eq!(manager.load().unwrap().unwrap(), state);

        fs::write(manager.backup_path(), json!([1, 2]).to_string()).unwrap();
        assert!(manager.load().unwrap().is_none());
    }

    #[test]
    fn test_backup_honors_interval() {
        let dir = TempDir::new().unwrap();
        let mut manager = SaveManager::new(dir.path()).unwrap();
        // Nothing to back up yet
        assert!(!manager.backup_if_due(BACKUP_INTERVAL_MS).unwrap());

        manager.save(&sample_state());
        assert!(manager.backup_if_due(BACKUP_INTERVAL_MS).unwrap());
        assert!(!manager.backup_if_due(BACKUP_INTERVAL_MS + 1000).unwrap());
        assert!(manager
            .backup_if_due(2 * BACKUP_INTERVAL_MS + 1000)
            .unwrap());

        let restored = manager.restore_backup().unwrap().unwrap();
        assert_eq!(restored.character.unwrap().name, "Ilya");
    }

    #[test]
    fn test_export_import_round_trip() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        let state = sample_state();
        manager.save(&state);

        let exported = manager.export_save().unwrap().unwrap();

        let other_dir = TempDir::new().unwrap();
        let other = SaveManager::new(other_dir.path()).unwrap();
        let imported = other.import_save(&exported).unwrap();
        assert_eq!(imported, state);
        assert_eq!(other.load().unwrap().unwrap(), state);
    }

    #[test]
    fn test_import_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        assert!(manager.import_save("][").is_err());
        assert!(manager.import_save("\"just a string\"").is_err());
    }

    #[test]
    fn test_journal_growth_survives_round_trip() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        let mut state = sample_state();
        {
            let character = state.character.as_mut().unwrap();
            for i in 0..100 {
                character.add_journal_entry(JournalEntry::new(
                    format!("day {i}"),
                    Mood::Neutral,
                    i,
                ));
            }
            // The journal itself caps at the truncation length
            assert_eq!(character.journal.len(), JOURNAL_TRUNCATE_LEN);
        }
        manager.save(&state);
        let loaded = manager.load().unwrap().unwrap();
        assert_eq!(
            loaded.character.unwrap().journal.len(),
            JOURNAL_TRUNCATE_LEN
        );
    }

    #[test]
    fn test_debounce_coalesces_marks() {
        let mut debounce = DebouncedSave::default();
        assert!(!debounce.should_flush(10_000));

        debounce.mark_dirty(1_000);
        debounce.mark_dirty(1_500);
        assert!(debounce.is_dirty());
        // Earliest mark wins
        assert!(!debounce.should_flush(1_900));
        assert!(debounce.should_flush(2_000));

        debounce.flushed();
        assert!(!debounce.is_dirty());
        assert!(!debounce.should_flush(10_000));
    }
}
