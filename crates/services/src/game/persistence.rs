use std::fmt;
use std::sync::Arc;

use pathfinder_core::catalog::Catalog;
use pathfinder_core::model::SessionState;
use storage::repository::{KeyValueStore, ProgressRecord, StorageError};
use tracing::{debug, warn};

/// Loads and saves session progress under one storage key.
///
/// Failures never escape: a broken store degrades to default progress on load
/// and to an unsaved session on save, with a warning logged either way.
#[derive(Clone)]
pub struct ProgressPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ProgressPersistence {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Restore progress, sanitized against `catalog`.
    #[must_use]
    pub fn restore(&self, catalog: &Catalog) -> SessionState {
        let mut state = match self.try_restore() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!(key = %self.key, "no saved progress; starting at level 1");
                return SessionState::default();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "could not load progress; starting fresh");
                return SessionState::default();
            }
        };

        if state.retain_valid(catalog) {
            warn!(
                key = %self.key,
                current = %state.current(),
                completed = state.completed().len(),
                "saved progress referenced unknown levels; dropped them"
            );
        }
        state
    }

    fn try_restore(&self) -> Result<Option<SessionState>, StorageError> {
        let Some(raw) = self.store.load(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(ProgressRecord::decode(&raw)?.into_state()))
    }

    /// Save progress. Returns `false` if the store rejected it.
    pub fn persist(&self, state: &SessionState) -> bool {
        let result = ProgressRecord::from_state(state)
            .encode()
            .and_then(|raw| self.store.save(&self.key, &raw));
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.key, error = %err, "could not save progress");
                false
            }
        }
    }
}

impl fmt::Debug for ProgressPersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
