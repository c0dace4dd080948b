mod chapter;
mod ids;
mod level;
mod session;
mod settings;

/// Document and result values: a closed JSON tree whose objects keep key
/// insertion order.
pub use serde_json::Value;

pub use ids::{LevelId, ParseIdError};

pub use chapter::Chapter;
pub use level::{Level, LevelDraft, LevelError, SandboxDraft};
pub use session::{SessionState, SessionStateError};
pub use settings::{DEFAULT_MAX_HINTS, DEFAULT_STORAGE_KEY, GameSettings, SettingsError};
