use serde::Deserialize;
use thiserror::Error;

use crate::model::{LevelId, Value};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("level id 0 is reserved for the sandbox")]
    ReservedId,

    #[error("level title cannot be empty")]
    EmptyTitle,

    #[error("level chapter cannot be empty")]
    EmptyChapter,

    #[error("level mission cannot be empty")]
    EmptyMission,

    #[error("level must have at least one hint")]
    NoHints,

    #[error("solution must be a non-empty expression starting with '$'")]
    InvalidSolution,

    #[error("expected result must be an array")]
    ExpectedNotArray,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated level definition, as it appears in catalog data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LevelDraft {
    pub id: u32,
    pub chapter: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub mission: String,
    pub doc: Value,
    pub expected: Value,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub explanation: String,
}

impl LevelDraft {
    /// Validate the draft into an immutable curriculum level.
    ///
    /// # Errors
    ///
    /// Returns `LevelError` if the id is reserved, a required text field is
    /// blank, no hints are given, the solution is missing or not rooted at `$`,
    /// or the expected result is not an array.
    pub fn validate(self) -> Result<Level, LevelError> {
        if self.id == 0 {
            return Err(LevelError::ReservedId);
        }
        if self.chapter.trim().is_empty() {
            return Err(LevelError::EmptyChapter);
        }
        if self.title.trim().is_empty() {
            return Err(LevelError::EmptyTitle);
        }
        if self.mission.trim().is_empty() {
            return Err(LevelError::EmptyMission);
        }
        if self.hints.is_empty() {
            return Err(LevelError::NoHints);
        }
        let solution = self
            .solution
            .map(|s| s.trim().to_owned())
            .filter(|s| s.starts_with('$'))
            .ok_or(LevelError::InvalidSolution)?;
        let Value::Array(expected) = self.expected else {
            return Err(LevelError::ExpectedNotArray);
        };

        Ok(Level {
            id: LevelId::new(self.id),
            chapter: self.chapter.trim().to_owned(),
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            mission: self.mission.trim().to_owned(),
            doc: self.doc,
            expected,
            hints: self.hints,
            solution: Some(solution),
            explanation: self.explanation.trim().to_owned(),
        })
    }
}

//
// ─── SANDBOX ───────────────────────────────────────────────────────────────────
//

/// Definition of the free-exploration level. It has no id, expected result
/// or solution of its own.
#[derive(Debug, Clone, Deserialize)]
pub struct SandboxDraft {
    pub chapter: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub mission: String,
    pub doc: Value,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// A single lesson: a document, a mission, and the result a correct query yields.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    id: LevelId,
    chapter: String,
    title: String,
    description: String,
    mission: String,
    doc: Value,
    expected: Vec<Value>,
    hints: Vec<String>,
    solution: Option<String>,
    explanation: String,
}

impl Level {
    /// Builds the synthetic sandbox level: id 0, empty expected result, no solution.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::NoHints` if the sandbox definition carries no hints.
    pub fn sandbox(draft: SandboxDraft) -> Result<Self, LevelError> {
        if draft.hints.is_empty() {
            return Err(LevelError::NoHints);
        }
        Ok(Self {
            id: LevelId::SANDBOX,
            chapter: draft.chapter,
            title: draft.title,
            description: draft.description,
            mission: draft.mission,
            doc: draft.doc,
            expected: Vec::new(),
            hints: draft.hints,
            solution: None,
            explanation: draft.explanation,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> LevelId {
        self.id
    }

    #[must_use]
    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn mission(&self) -> &str {
        &self.mission
    }

    #[must_use]
    pub fn doc(&self) -> &Value {
        &self.doc
    }

    #[must_use]
    pub fn expected(&self) -> &[Value] {
        &self.expected
    }

    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Hint to show after `used` hints were already consumed.
    ///
    /// Past the end of the list the last (most revealing) hint repeats.
    #[must_use]
    pub fn hint(&self, used: usize) -> Option<&str> {
        let last = self.hints.len().checked_sub(1)?;
        self.hints.get(used.min(last)).map(String::as_str)
    }

    #[must_use]
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.id.is_sandbox()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
