//! High score persistence
//!
//! Backends:
//! - LocalStorage in the browser (same key the web build always used)
//! - JSON file for native/headless runs
//! - In-memory for tests and storage-less hosts
//!
//! Failures are reported as [`PersistenceError`]; the game logs them and
//! carries on as if nothing was stored.

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
pub(crate) mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("stored value is corrupt: {0}")]
    Corrupt(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Where the best score lives between sessions
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<u64>, PersistenceError>;
    fn save(&mut self, score: u64) -> Result<(), PersistenceError>;
}

/// Read the stored high score, treating any failure as "none stored"
pub fn load_or_zero(store: &dyn HighScoreStore) -> u64 {
    match store.load() {
        Ok(score) => score.unwrap_or(0),
        Err(e) => {
            log::warn!("Could not read high score, starting from 0: {}", e);
            0
        }
    }
}

/// Write the high score; a failure is logged and the write skipped
pub fn save_or_log(store: &mut dyn HighScoreStore, score: u64) -> bool {
    match store.save(score) {
        Ok(()) => {
            log::info!("High score {} saved", score);
            true
        }
        Err(e) => {
            log::warn!("High score write skipped: {}", e);
            false
        }
    }
}

/// Volatile store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub score: Option<u64>,
    /// Number of successful saves
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_score(score: u64) -> Self {
        Self {
            score: Some(score),
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u64>, PersistenceError> {
        Ok(self.score)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.score = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// Parse a stored decimal score (LocalStorage holds strings)
pub fn parse_score(raw: &str) -> Result<u64, PersistenceError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| PersistenceError::Corrupt(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<Option<u64>, PersistenceError> {
            Err(PersistenceError::Unavailable("disk on fire".into()))
        }
        fn save(&mut self, _score: u64) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("disk on fire".into()))
        }
    }

    #[test]
    fn test_failures_degrade() {
        let mut store = BrokenStore;
        assert_eq!(load_or_zero(&store), 0);
        assert!(!save_or_log(&mut store, 10));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(load_or_zero(&store), 0);
        assert!(save_or_log(&mut store, 42));
        assert_eq!(load_or_zero(&store), 42);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(" 17 ").unwrap(), 17);
        assert!(matches!(parse_score("abc"), Err(PersistenceError::Corrupt(_))));
        assert!(parse_score("-3").is_err());
    }
}
