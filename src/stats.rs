//! Session statistics and the persisted high score.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GameError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub ships_left: u32,
    /// Starts at 1.
    pub level: u32,
    /// Never reset and never decreases.
    pub high_score: u32,
}

impl GameStats {
    pub fn new(ship_limit: u32, high_score: u32) -> Self {
        GameStats { score: 0, ships_left: ship_limit, level: 1, high_score }
    }

    /// Reset the statistics that change during a game.
    pub fn reset_stats(&mut self, ship_limit: u32) {
        self.ships_left = ship_limit;
        self.score = 0;
        self.level = 1;
    }

    /// Promote the current score to high score if it beats it.
    pub fn check_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(default)]
    high_score: u32,
    /// Unix seconds of the last write.
    #[serde(default)]
    save_time: f64,
    /// Unknown keys already in the file are written back untouched.
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// JSON file holding `{"high_score": n, "save_time": t}`.
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Result<Option<HighScoreRecord>, GameError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(GameError::Io { path: self.path.clone(), source }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| GameError::HighScoreFormat { path: self.path.clone(), source })
    }

    /// Stored high score; a missing file reads as 0.
    pub fn load(&self) -> Result<u32, GameError> {
        Ok(self.read_record()?.map(|r| r.high_score).unwrap_or(0))
    }

    /// Like [`load`](Self::load), but any failure is logged and read as 0.
    pub fn load_or_default(&self) -> u32 {
        self.load().unwrap_or_else(|e| {
            warn!("{e}; starting with no high score");
            0
        })
    }

    pub fn save(&self, high_score: u32) -> Result<(), GameError> {
        // A corrupt existing file is simply replaced.
        let mut record = self.read_record().ok().flatten().unwrap_or_default();
        record.high_score = high_score;
        record.save_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        let text = serde_json::to_string(&record).map_err(GameError::HighScoreEncode)?;
        std::fs::write(&self.path, text)
            .map_err(|source| GameError::Io { path: self.path.clone(), source })?;
        debug!(high_score, path = %self.path.display(), "high score saved");
        Ok(())
    }

    pub fn save_or_log(&self, high_score: u32) {
        if let Err(e) = self.save(high_score) {
            warn!("could not save high score: {e}");
        }
    }
}
