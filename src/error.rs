//! Error types for the game's file-backed collaborators.
//!
//! The simulation itself never fails; these only arise at the edges, where
//! the frontend decides the fallback and logs the cause.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// File exists but could not be read or written.
    #[error("failed to access '{}': {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    /// High-score record is not valid JSON or has the wrong shape.
    #[error("corrupt high score record in '{}': {source}", path.display())]
    HighScoreFormat { path: PathBuf, source: serde_json::Error },

    #[error("failed to encode high score record: {0}")]
    HighScoreEncode(#[source] serde_json::Error),

    /// Settings override file failed to parse.
    #[error("invalid settings file '{}': {source}", path.display())]
    Settings { path: PathBuf, source: toml::de::Error },
}
