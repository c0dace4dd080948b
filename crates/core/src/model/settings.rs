use serde::Deserialize;
use thiserror::Error;

/// Hints available per level before the hint control is exhausted.
pub const DEFAULT_MAX_HINTS: u8 = 3;

/// Storage key the progress record is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "summitPathfinderProgress";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("max hints must be > 0")]
    InvalidMaxHints,

    #[error("storage key cannot be empty")]
    EmptyStorageKey,
}

/// Tunables for a game session.
///
/// Deserializes from JSON with every field optional, so a shell can ship a
/// partial config file and inherit the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SettingsDraft")]
pub struct GameSettings {
    max_hints: u8,
    storage_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsDraft {
    #[serde(default = "default_max_hints")]
    max_hints: u8,
    #[serde(default = "default_storage_key")]
    storage_key: String,
}

fn default_max_hints() -> u8 {
    DEFAULT_MAX_HINTS
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_owned()
}

impl TryFrom<SettingsDraft> for GameSettings {
    type Error = SettingsError;

    fn try_from(draft: SettingsDraft) -> Result<Self, Self::Error> {
        Self::new(draft.max_hints, draft.storage_key)
    }
}

impl GameSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if `max_hints` is zero or the key is blank.
    pub fn new(max_hints: u8, storage_key: impl Into<String>) -> Result<Self, SettingsError> {
        if max_hints == 0 {
            return Err(SettingsError::InvalidMaxHints);
        }
        let storage_key = storage_key.into().trim().to_owned();
        if storage_key.is_empty() {
            return Err(SettingsError::EmptyStorageKey);
        }
        Ok(Self {
            max_hints,
            storage_key,
        })
    }

    #[must_use]
    pub fn max_hints(&self) -> u8 {
        self.max_hints
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_hints: DEFAULT_MAX_HINTS,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.max_hints(), 3);
        assert_eq!(settings.storage_key(), "summitPathfinderProgress");
    }

    #[test]
    fn new_rejects_zero_hints_and_blank_key() {
        assert_eq!(
            GameSettings::new(0, "key").unwrap_err(),
            SettingsError::InvalidMaxHints
        );
        assert_eq!(
            GameSettings::new(3, "   ").unwrap_err(),
            SettingsError::EmptyStorageKey
        );
    }

    #[test]
    fn deserializes_partial_config() {
        let settings: GameSettings = serde_json::from_str(r#"{ "maxHints": 5 }"#).unwrap();
        assert_eq!(settings.max_hints(), 5);
        assert_eq!(settings.storage_key(), DEFAULT_STORAGE_KEY);

        let settings: GameSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn deserialize_validates() {
        let result = serde_json::from_str::<GameSettings>(r#"{ "maxHints": 0 }"#);
        assert!(result.is_err());
    }
}
