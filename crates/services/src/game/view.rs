use pathfinder_core::model::{LevelId, Value};

/// Result of running a learner's query against the active level.
///
/// Presentation-agnostic: the shell decides how to word match counts and
/// success banners.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The input was blank; nothing was evaluated.
    Idle,
    Evaluated {
        matches: Vec<Value>,
        /// The matches are equivalent to the level's expected result.
        solved: bool,
        /// This run completed the level for the first time.
        newly_completed: bool,
    },
}

impl QueryOutcome {
    #[must_use]
    pub fn matches(&self) -> &[Value] {
        match self {
            Self::Idle => &[],
            Self::Evaluated { matches, .. } => matches,
        }
    }

    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matches().len()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Evaluated { solved: true, .. })
    }

    #[must_use]
    pub fn is_newly_completed(&self) -> bool {
        matches!(
            self,
            Self::Evaluated {
                newly_completed: true,
                ..
            }
        )
    }
}

/// How a level appears in the level picker. Earlier variants take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Current,
    Completed,
    Unlocked,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTile {
    pub id: LevelId,
    pub title: String,
    pub status: LevelStatus,
    /// Whether `select_level` would accept this id.
    pub selectable: bool,
}

/// One chapter's row in the level picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterTiles {
    pub slug: String,
    pub name: String,
    pub icon: String,
    pub levels: Vec<LevelTile>,
}
