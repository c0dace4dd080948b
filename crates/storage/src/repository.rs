use pathfinder_core::model::{LevelId, SessionState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Persisted shape of a learner's progress.
///
/// Stored as `{ "currentLevel": n, "completedLevels": [..] }`. Hint usage and
/// the sandbox overlay are deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub current_level: u32,
    #[serde(default)]
    pub completed_levels: Vec<u32>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            current_level: state.current().value(),
            completed_levels: state.completed().iter().map(LevelId::value).collect(),
        }
    }

    /// Convert the record back into session state.
    ///
    /// A missing or zero `currentLevel` means level 1. Ids are not checked
    /// against any catalog here; callers sanitize with `SessionState::retain_valid`.
    #[must_use]
    pub fn into_state(self) -> SessionState {
        let current = match self.current_level {
            0 => LevelId::FIRST,
            n => LevelId::new(n),
        };
        SessionState::from_persisted(
            current,
            self.completed_levels.into_iter().map(LevelId::new),
        )
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the record cannot be encoded.
    pub fn encode(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if `raw` is not a progress record.
    pub fn decode(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Scoped key-value persistence for string blobs.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and embedding.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Holds the key-value backend behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_shape() {
        let mut state = SessionState::default();
        state.go_to(LevelId::new(5));
        state.mark_completed(LevelId::new(2));
        state.mark_completed(LevelId::new(1));

        let raw = ProgressRecord::from_state(&state).encode().unwrap();
        assert_eq!(raw, r#"{"currentLevel":5,"completedLevels":[1,2]}"#);
    }

    #[test]
    fn record_round_trips_progress() {
        let state = SessionState::from_persisted(
            LevelId::new(3),
            [LevelId::new(1), LevelId::new(2)],
        );
        let raw = ProgressRecord::from_state(&state).encode().unwrap();
        let restored = ProgressRecord::decode(&raw).unwrap().into_state();
        assert_eq!(restored, state);
    }

    #[test]
    fn missing_fields_fall_back_to_first_level() {
        let state = ProgressRecord::decode("{}").unwrap().into_state();
        assert_eq!(state.current(), LevelId::FIRST);
        assert!(state.completed().is_empty());

        let state = ProgressRecord::decode(r#"{"currentLevel":0}"#)
            .unwrap()
            .into_state();
        assert_eq!(state.current(), LevelId::FIRST);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            ProgressRecord::decode("not json"),
            Err(StorageError::Serialization(_))
        ));
        assert!(matches!(
            ProgressRecord::decode(r#"{"currentLevel":"two"}"#),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn in_memory_store_shares_entries_between_clones() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.save("k", "v").unwrap();
        assert_eq!(other.load("k").unwrap().as_deref(), Some("v"));
        other.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);
    }
}
