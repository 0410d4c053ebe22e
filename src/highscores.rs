//! Local leaderboard
//!
//! Tracks the top 5 runs. Backs the local reward pipeline; the single
//! best score lives in [`crate::persistence`].

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use crate::persistence::local_storage;
use crate::persistence::PersistenceError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Top-5 leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pixel_racer_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries
            .insert(rank - 1, HighScoreEntry { score, timestamp });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Parse a stored board. Entries are re-sorted and capped since the
    /// stored text may have been edited by hand.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let mut board: HighScores = serde_json::from_str(json)?;
        board.entries.retain(|e| e.score > 0);
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(MAX_HIGH_SCORES);
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Board from LocalStorage; empty when nothing was stored yet
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, PersistenceError> {
        match local_storage::read_item(Self::STORAGE_KEY)? {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::new()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), PersistenceError> {
        local_storage::write_item(Self::STORAGE_KEY, &self.to_json()?)
    }

    /// Native builds keep the board in memory only
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, PersistenceError> {
        Ok(Self::new())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
