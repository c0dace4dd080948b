use std::fmt;
use std::sync::Arc;

use pathfinder_core::answer::is_equivalent;
use pathfinder_core::catalog::Catalog;
use pathfinder_core::model::{GameSettings, Level, LevelId, SessionState};
use storage::repository::KeyValueStore;
use tracing::{debug, info};

use super::persistence::ProgressPersistence;
use super::view::{ChapterTiles, LevelStatus, LevelTile, QueryOutcome};
use crate::error::ControllerError;
use crate::query::{JsonPathEvaluator, QueryEvaluator};

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns a learner's session: which level is active, what is completed, hint
/// usage, and the sandbox overlay.
///
/// Every operation runs to completion on the caller's thread. Progress is
/// saved after each transition that changes it; storage failures are logged
/// and never surface as errors.
pub struct GameController {
    catalog: Arc<Catalog>,
    settings: GameSettings,
    state: SessionState,
    persistence: ProgressPersistence,
    evaluator: Arc<dyn QueryEvaluator>,
}

impl GameController {
    /// Create a controller, restoring saved progress from `store`.
    ///
    /// Unreadable or corrupt progress falls back to level 1 with nothing completed.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        settings: GameSettings,
        store: Arc<dyn KeyValueStore>,
        evaluator: Arc<dyn QueryEvaluator>,
    ) -> Self {
        let persistence = ProgressPersistence::new(store, settings.storage_key());
        let state = persistence.restore(&catalog);
        debug!(
            current = %state.current(),
            completed = state.completed().len(),
            "session restored"
        );
        Self {
            catalog,
            settings,
            state,
            persistence,
            evaluator,
        }
    }

    /// Controller over the bundled curriculum with default settings and the
    /// JSONPath evaluator.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Catalog` if the bundled curriculum fails to load.
    pub fn builtin(store: Arc<dyn KeyValueStore>) -> Result<Self, ControllerError> {
        let catalog = Arc::new(Catalog::builtin()?);
        Ok(Self::new(
            catalog,
            GameSettings::default(),
            store,
            Arc::new(JsonPathEvaluator::new()),
        ))
    }

    // Accessors
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn current_level(&self) -> LevelId {
        self.state.current()
    }

    #[must_use]
    pub fn in_sandbox(&self) -> bool {
        self.state.in_sandbox()
    }

    /// The level being played: the sandbox while it is active, otherwise the
    /// current catalog level.
    #[must_use]
    pub fn active_level(&self) -> &Level {
        if self.state.in_sandbox() {
            return self.catalog.sandbox();
        }
        self.catalog
            .level(self.state.current())
            .unwrap_or_else(|| self.catalog.first_level())
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        self.active_level().explanation()
    }

    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        self.catalog.placeholder(self.active_level().id())
    }

    #[must_use]
    pub fn hints_used(&self) -> u8 {
        self.state.hints_used()
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u8 {
        self.settings.max_hints().saturating_sub(self.state.hints_used())
    }

    #[must_use]
    pub fn hints_exhausted(&self) -> bool {
        self.hints_remaining() == 0
    }

    #[must_use]
    pub fn is_unlocked(&self, id: LevelId) -> bool {
        self.state.is_unlocked(id, &self.catalog)
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.state.current() > self.catalog.first_id()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.state.current() < self.catalog.last_id()
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Jump to an unlocked level, leaving the sandbox if it is active.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::UnknownLevel` for ids outside the catalog and
    /// `ControllerError::LevelLocked` for levels not yet reachable. State is
    /// unchanged in both cases.
    pub fn select_level(&mut self, id: LevelId) -> Result<&Level, ControllerError> {
        if !self.catalog.contains(id) {
            debug!(level = %id, "rejected unknown level");
            return Err(ControllerError::UnknownLevel(id));
        }
        if !self.is_unlocked(id) {
            debug!(level = %id, "rejected locked level");
            return Err(ControllerError::LevelLocked(id));
        }
        self.load(id);
        Ok(self.active_level())
    }

    /// Move to the next level. Returns `false` on the last level.
    pub fn advance(&mut self) -> bool {
        let next = self
            .state
            .current()
            .next()
            .filter(|id| self.catalog.contains(*id));
        match next {
            Some(id) => {
                self.load(id);
                true
            }
            None => false,
        }
    }

    /// Move to the previous level. Returns `false` on level 1.
    pub fn retreat(&mut self) -> bool {
        match self.state.current().prev() {
            Some(id) => {
                self.load(id);
                true
            }
            None => false,
        }
    }

    fn load(&mut self, id: LevelId) {
        self.state.set_sandbox(false);
        self.state.go_to(id);
        debug!(level = %id, "level loaded");
        self.persistence.persist(&self.state);
    }

    //
    // ─── HINTS ─────────────────────────────────────────────────────────────────
    //

    /// Reveal the next hint for the active level.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::HintsExhausted` once the hint budget is spent.
    pub fn request_hint(&mut self) -> Result<&str, ControllerError> {
        let max = self.settings.max_hints();
        let used = self
            .state
            .use_hint(max)
            .map_err(|_| ControllerError::HintsExhausted)?;
        debug!(
            level = %self.active_level().id(),
            hint = used + 1,
            max,
            "hint revealed"
        );
        self.persistence.persist(&self.state);
        self.active_level()
            .hint(usize::from(used))
            .ok_or(ControllerError::HintsExhausted)
    }

    /// Reveal the canonical solution. This spends the whole hint budget.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::NoSolution` in the sandbox. The hint budget
    /// is spent either way.
    pub fn reveal_solution(&mut self) -> Result<&str, ControllerError> {
        self.state.exhaust_hints(self.settings.max_hints());
        let level = self.active_level();
        debug!(level = %level.id(), "solution revealed");
        level.solution().ok_or(ControllerError::NoSolution)
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Mark the current level completed. Returns `true` only the first time.
    ///
    /// Ignored while the sandbox is active.
    pub fn record_success(&mut self) -> bool {
        if self.state.in_sandbox() {
            debug!("success ignored in sandbox");
            return false;
        }
        let id = self.state.current();
        if !self.state.mark_completed(id) {
            return false;
        }
        info!(
            level = %id,
            completed = self.state.completed().len(),
            "level completed"
        );
        self.persistence.persist(&self.state);
        true
    }

    /// Evaluate `expression` against the active document and grade the result.
    ///
    /// A blank expression yields `QueryOutcome::Idle`. A matching result
    /// records success; the sandbox never counts as solved.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Query` if the evaluator rejects the expression.
    /// State is unchanged in that case.
    pub fn run_query(&mut self, expression: &str) -> Result<QueryOutcome, ControllerError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Ok(QueryOutcome::Idle);
        }

        let level = self.active_level();
        let matches = self
            .evaluator
            .evaluate(expression, level.doc())
            .inspect_err(|err| debug!(level = %level.id(), error = %err, "query failed"))?;
        let solved = !level.is_sandbox() && is_equivalent(&matches, level.expected());

        let newly_completed = solved && self.record_success();
        Ok(QueryOutcome::Evaluated {
            matches,
            solved,
            newly_completed,
        })
    }

    //
    // ─── SANDBOX ───────────────────────────────────────────────────────────────
    //

    /// Switch to the free-exploration level. Current level and completed set
    /// are kept for when the sandbox is left.
    pub fn enter_sandbox(&mut self) -> &Level {
        if !self.state.in_sandbox() {
            self.state.set_sandbox(true);
            self.state.reset_hints();
            debug!(resume = %self.state.current(), "entered sandbox");
        }
        self.catalog.sandbox()
    }

    /// Leave the sandbox and reload the level that was active before it.
    pub fn exit_sandbox(&mut self) -> &Level {
        if self.state.in_sandbox() {
            let id = self.state.current();
            self.load(id);
            debug!(level = %id, "left sandbox");
        }
        self.active_level()
    }

    /// Returns whether the sandbox is active afterwards.
    pub fn toggle_sandbox(&mut self) -> bool {
        if self.state.in_sandbox() {
            self.exit_sandbox();
        } else {
            self.enter_sandbox();
        }
        self.state.in_sandbox()
    }

    //
    // ─── PROGRESS ──────────────────────────────────────────────────────────────
    //

    /// Level picker rows, one per chapter.
    #[must_use]
    pub fn level_grid(&self) -> Vec<ChapterTiles> {
        self.catalog
            .chapters()
            .iter()
            .map(|chapter| ChapterTiles {
                slug: chapter.slug().to_owned(),
                name: chapter.name().to_owned(),
                icon: chapter.icon().to_owned(),
                levels: chapter
                    .levels()
                    .iter()
                    .filter_map(|id| self.catalog.level(*id))
                    .map(|level| self.tile(level))
                    .collect(),
            })
            .collect()
    }

    fn tile(&self, level: &Level) -> LevelTile {
        let id = level.id();
        let unlocked = self.is_unlocked(id);
        let status = if id == self.state.current() {
            LevelStatus::Current
        } else if self.state.is_completed(id) {
            LevelStatus::Completed
        } else if unlocked {
            LevelStatus::Unlocked
        } else {
            LevelStatus::Locked
        };
        LevelTile {
            id,
            title: level.title().to_owned(),
            status,
            selectable: unlocked,
        }
    }

    /// Forget all progress and save the fresh state.
    pub fn reset_progress(&mut self) {
        self.state = SessionState::default();
        info!("progress reset");
        self.persistence.persist(&self.state);
    }
}

impl fmt::Debug for GameController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("levels", &self.catalog.len())
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
