//! The curriculum: an ordered, immutable list of levels grouped into chapters,
//! plus the synthetic sandbox level.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Chapter, Level, LevelDraft, LevelError, LevelId, SandboxDraft};

const BUILTIN_LEVELS: &str = include_str!("../data/levels.json");
const BUILTIN_SANDBOX: &str = include_str!("../data/sandbox.json");

const SANDBOX_PLACEHOLDER: &str = "$.expedition.teams[*].name";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog data is malformed: {0}")]
    Parse(String),

    #[error("catalog has no levels")]
    Empty,

    #[error("level ids must be sequential from 1: expected {expected}, found {found}")]
    NonSequentialId { expected: u32, found: u32 },

    #[error("level {id} is invalid: {source}")]
    InvalidLevel { id: u32, source: LevelError },

    #[error("sandbox level is invalid: {0}")]
    InvalidSandbox(LevelError),

    #[error("level {id} names unknown chapter {chapter:?}")]
    UnknownChapter { id: LevelId, chapter: String },

    #[error("level {id} is not listed by exactly one matching chapter")]
    ChapterLevelMismatch { id: LevelId },
}

#[derive(Deserialize)]
struct CatalogFile {
    chapters: Vec<Chapter>,
    levels: Vec<LevelDraft>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    levels: Vec<Level>,
    chapters: Vec<Chapter>,
    sandbox: Level,
}

impl Catalog {
    /// The bundled 20-level curriculum.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` only if the embedded data is broken.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_LEVELS, BUILTIN_SANDBOX)
    }

    /// Parse and validate a catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, otherwise whatever
    /// `Catalog::new` rejects.
    pub fn from_json(levels_json: &str, sandbox_json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(levels_json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let sandbox: SandboxDraft =
            serde_json::from_str(sandbox_json).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let levels = file
            .levels
            .into_iter()
            .map(|draft| {
                let id = draft.id;
                draft
                    .validate()
                    .map_err(|source| CatalogError::InvalidLevel { id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let sandbox = Level::sandbox(sandbox).map_err(CatalogError::InvalidSandbox)?;

        Self::new(levels, file.chapters, sandbox)
    }

    /// Assemble a catalog from validated levels.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if ids are not contiguous from 1, a level names a
    /// chapter that does not exist, or chapters and levels disagree on membership.
    pub fn new(
        levels: Vec<Level>,
        chapters: Vec<Chapter>,
        sandbox: Level,
    ) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, level) in levels.iter().enumerate() {
            let expected = u32::try_from(index + 1).unwrap_or(u32::MAX);
            if level.id().value() != expected {
                return Err(CatalogError::NonSequentialId {
                    expected,
                    found: level.id().value(),
                });
            }
        }

        for level in &levels {
            let Some(chapter) = chapters.iter().find(|c| c.name() == level.chapter()) else {
                return Err(CatalogError::UnknownChapter {
                    id: level.id(),
                    chapter: level.chapter().to_owned(),
                });
            };
            let listings = chapters.iter().filter(|c| c.contains(level.id())).count();
            if listings != 1 || !chapter.contains(level.id()) {
                return Err(CatalogError::ChapterLevelMismatch { id: level.id() });
            }
        }

        for chapter in &chapters {
            for id in chapter.levels() {
                let owned = levels
                    .get(index_of(*id).unwrap_or(usize::MAX))
                    .is_some_and(|level| level.chapter() == chapter.name());
                if !owned {
                    return Err(CatalogError::ChapterLevelMismatch { id: *id });
                }
            }
        }

        Ok(Self {
            levels,
            chapters,
            sandbox,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[must_use]
    pub fn first_id(&self) -> LevelId {
        LevelId::FIRST
    }

    #[must_use]
    pub fn last_id(&self) -> LevelId {
        LevelId::new(u32::try_from(self.levels.len()).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub fn contains(&self, id: LevelId) -> bool {
        self.level(id).is_some()
    }

    #[must_use]
    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(index_of(id)?)
    }

    /// Level 1. Catalogs are never empty.
    #[must_use]
    pub fn first_level(&self) -> &Level {
        &self.levels[0]
    }

    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    #[must_use]
    pub fn chapter_of(&self, id: LevelId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.contains(id))
    }

    #[must_use]
    pub fn sandbox(&self) -> &Level {
        &self.sandbox
    }

    /// Starter text for the query input, growing with the curriculum.
    #[must_use]
    pub fn placeholder(&self, id: LevelId) -> &'static str {
        match id.value() {
            0 => SANDBOX_PLACEHOLDER,
            1..=5 => "$.",
            6..=10 => "$.[?(@.)]",
            _ => "$..",
        }
    }
}

fn index_of(id: LevelId) -> Option<usize> {
    usize::try_from(id.value()).ok()?.checked_sub(1)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
