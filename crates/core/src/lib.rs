#![forbid(unsafe_code)]

pub mod answer;
pub mod catalog;
pub mod model;

pub use answer::{canonicalize, is_equivalent};
pub use catalog::{Catalog, CatalogError};
pub use model::{
    Chapter, GameSettings, Level, LevelDraft, LevelError, LevelId, SessionState,
    SessionStateError, SettingsError, Value,
};
