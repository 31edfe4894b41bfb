//! Persistent best scores
//!
//! One RON file under the platform data directory holds the best score per
//! game. A missing or unreadable file is not an error worth surfacing to
//! the player; the table just starts at zero.

use crate::app::GameId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for score persistence
#[derive(Debug)]
pub enum ScoreError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for ScoreError {
    fn from(e: std::io::Error) -> Self {
        ScoreError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ScoreError {
    fn from(e: ron::error::SpannedError) -> Self {
        ScoreError::ParseError(e)
    }
}

impl From<ron::Error> for ScoreError {
    fn from(e: ron::Error) -> Self {
        ScoreError::SerializeError(e)
    }
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::IoError(e) => write!(f, "IO error: {}", e),
            ScoreError::ParseError(e) => write!(f, "Parse error: {}", e),
            ScoreError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Best score per game
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub snake: u32,
    pub flappy: u32,
    pub caverns: u32,
    pub slingshot: u32,
}

impl ScoreTable {
    pub fn best(&self, game: GameId) -> u32 {
        match game {
            GameId::Snake => self.snake,
            GameId::Flappy => self.flappy,
            GameId::Caverns => self.caverns,
            GameId::Slingshot => self.slingshot,
        }
    }

    /// Record a finished run. Returns true when it beat the stored best.
    pub fn record(&mut self, game: GameId, score: u32) -> bool {
        let slot = match game {
            GameId::Snake => &mut self.snake,
            GameId::Flappy => &mut self.flappy,
            GameId::Caverns => &mut self.caverns,
            GameId::Slingshot => &mut self.slingshot,
        };
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ScoreError> {
        let text = fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ScoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Load the table from its default location, degrading to zeros.
    pub fn load_or_default() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = default_path() {
            match Self::load_from(&path) {
                Ok(table) => return table,
                Err(ScoreError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => eprintln!("Ignoring unreadable score file: {}", e),
            }
        }
        Self::default()
    }

    /// Write the table to its default location, logging failures.
    pub fn save(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = default_path() {
            if let Err(e) = self.save_to(&path) {
                eprintln!("Failed to save scores: {}", e);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_path() -> Option<std::path::PathBuf> {
    Some(dirs::data_dir()?.join("quadcade").join("scores.ron"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_maximum() {
        let mut table = ScoreTable::default();
        assert!(table.record(GameId::Snake, 40));
        assert!(!table.record(GameId::Snake, 20));
        assert_eq!(table.best(GameId::Snake), 40);
        assert!(table.record(GameId::Snake, 60));
        assert_eq!(table.best(GameId::Snake), 60);
    }

    #[test]
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.ron");

        let mut table = ScoreTable::default();
        table.record(GameId::Flappy, 17);
        table.record(GameId::Slingshot, 3);
        table.save_to(&path).unwrap();

        let loaded = ScoreTable::load_from(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.ron");
        std::fs::write(&path, "not ron at all {{{").unwrap();
        assert!(matches!(
            ScoreTable::load_from(&path),
            Err(ScoreError::ParseError(_))
        ));
    }
}
