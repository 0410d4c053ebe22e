//! JSON file backend for native runs

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{HighScoreStore, PersistenceError};

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    high_score: u64,
}

/// Stores `{"high_score": N}` at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u64>, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: Record = serde_json::from_str(&json)?;
        Ok(Some(record.high_score))
    }

    fn save(&mut self, score: u64) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&Record { high_score: score })?;
        // Write-then-rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixel-racer-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_none() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        store.save(321).unwrap();
        assert_eq!(store.load().unwrap(), Some(321));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_garbage_file_is_error() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Serde(_))));
        let _ = fs::remove_file(path);
    }
}
