mod controller;
mod persistence;
mod view;

// Public API of the game subsystem.
pub use crate::error::ControllerError;
pub use controller::GameController;
pub use persistence::ProgressPersistence;
pub use view::{ChapterTiles, LevelStatus, LevelTile, QueryOutcome};
