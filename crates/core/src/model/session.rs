use std::collections::BTreeSet;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::LevelId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("all {max} hints for this level have been used")]
    HintsExhausted { max: u8 },
}

/// A learner's progress: where they are, what they finished, and how many
/// hints the active level has cost them.
///
/// Only `current` and `completed` survive a restart; hint usage and the
/// sandbox overlay are per-session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current: LevelId,
    completed: BTreeSet<LevelId>,
    hints_used: u8,
    sandbox: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current: LevelId::FIRST,
            completed: BTreeSet::new(),
            hints_used: 0,
            sandbox: false,
        }
    }
}

impl SessionState {
    /// Rehydrate progress from persisted storage. Hints and sandbox start fresh.
    #[must_use]
    pub fn from_persisted(current: LevelId, completed: impl IntoIterator<Item = LevelId>) -> Self {
        Self {
            current,
            completed: completed.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn current(&self) -> LevelId {
        self.current
    }

    #[must_use]
    pub fn completed(&self) -> &BTreeSet<LevelId> {
        &self.completed
    }

    #[must_use]
    pub fn is_completed(&self, id: LevelId) -> bool {
        self.completed.contains(&id)
    }

    #[must_use]
    pub fn hints_used(&self) -> u8 {
        self.hints_used
    }

    #[must_use]
    pub fn in_sandbox(&self) -> bool {
        self.sandbox
    }

    /// Level 1 is always open; any other level opens once it or its
    /// predecessor is completed. Ids outside the catalog are never unlocked.
    #[must_use]
    pub fn is_unlocked(&self, id: LevelId, catalog: &Catalog) -> bool {
        if !catalog.contains(id) {
            return false;
        }
        id == LevelId::FIRST
            || self.is_completed(id)
            || id.prev().is_some_and(|prev| self.is_completed(prev))
    }

    /// Make `id` the active level and reset hint usage.
    pub fn go_to(&mut self, id: LevelId) {
        self.current = id;
        self.hints_used = 0;
    }

    /// Returns `true` when `id` was not already completed.
    pub fn mark_completed(&mut self, id: LevelId) -> bool {
        self.completed.insert(id)
    }

    /// Consume one hint and return the number used before this call.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::HintsExhausted` once `max` hints are used.
    pub fn use_hint(&mut self, max: u8) -> Result<u8, SessionStateError> {
        if self.hints_used >= max {
            return Err(SessionStateError::HintsExhausted { max });
        }
        let before = self.hints_used;
        self.hints_used += 1;
        Ok(before)
    }

    pub fn exhaust_hints(&mut self, max: u8) {
        self.hints_used = max;
    }

    pub fn reset_hints(&mut self) {
        self.hints_used = 0;
    }

    pub fn set_sandbox(&mut self, on: bool) {
        self.sandbox = on;
    }

    /// Drop anything that does not fit `catalog`. Returns `true` if the state changed.
    pub fn retain_valid(&mut self, catalog: &Catalog) -> bool {
        let before = self.completed.len();
        self.completed.retain(|id| catalog.contains(*id));
        let mut changed = before != self.completed.len();
        if !catalog.contains(self.current) {
            self.go_to(LevelId::FIRST);
            changed = true;
        }
        changed
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
