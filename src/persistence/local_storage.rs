//! LocalStorage backend (WASM only)

use super::{HighScoreStore, PersistenceError, parse_score};

/// LocalStorage key, kept compatible with earlier web builds
const STORAGE_KEY: &str = "pixelRacerHighScore";

fn storage() -> Result<web_sys::Storage, PersistenceError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or_else(|| PersistenceError::Unavailable("no LocalStorage".to_string()))
}

/// Raw string under `key`, `Ok(None)` when the key was never written
pub(crate) fn read_item(key: &str) -> Result<Option<String>, PersistenceError> {
    storage()?
        .get_item(key)
        .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))
}

/// Store `value` under `key`; quota and privacy-mode failures surface here
pub(crate) fn write_item(key: &str, value: &str) -> Result<(), PersistenceError> {
    storage()?
        .set_item(key, value)
        .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u64>, PersistenceError> {
        read_item(STORAGE_KEY)?.as_deref().map(parse_score).transpose()
    }

    fn save(&mut self, score: u64) -> Result<(), PersistenceError> {
        write_item(STORAGE_KEY, &score.to_string())
    }
}
