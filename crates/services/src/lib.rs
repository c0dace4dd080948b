#![forbid(unsafe_code)]

pub mod error;
pub mod game;
pub mod query;

pub use error::{ControllerError, QueryError};
pub use game::{
    ChapterTiles, GameController, LevelStatus, LevelTile, ProgressPersistence, QueryOutcome,
};
pub use query::{JsonPathEvaluator, QueryEvaluator};
