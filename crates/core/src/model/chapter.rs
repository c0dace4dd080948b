use serde::Deserialize;

use crate::model::LevelId;

/// A named group of consecutive levels sharing a theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chapter {
    slug: String,
    name: String,
    #[serde(default)]
    icon: String,
    levels: Vec<LevelId>,
}

impl Chapter {
    #[must_use]
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        levels: Vec<LevelId>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            icon: icon.into(),
            levels,
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn levels(&self) -> &[LevelId] {
        &self.levels
    }

    #[must_use]
    pub fn contains(&self, id: LevelId) -> bool {
        self.levels.contains(&id)
    }
}
