//! Bot settings loaded from a JSON file.
//!
//! The default location is `<config_dir>/silva/settings.json`. A missing file
//! yields the defaults, missing keys take their default values and unknown keys
//! are ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config and data dirs
pub const APP_DIR_NAME: &str = "silva";

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Error types for settings loading
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings from {path:?}: {message}")]
    Read { path: PathBuf, message: String },
    #[error("Failed to parse settings: {0}")]
    Parse(String),
    #[error("Failed to write settings: {0}")]
    Write(String),
    #[error("Could not determine the platform config directory")]
    ConfigDirNotFound,
}

/// Runtime configuration for the bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Prefix that marks a line as a command
    pub command_prefix: String,
    /// Users allowed to run owner-only commands
    pub owner_ids: Vec<u64>,
    /// Directory holding the libsql database; platform data dir when unset
    pub database_dir: Option<PathBuf>,
    /// Use a JSON alias file instead of the database
    pub alias_file: Option<PathBuf>,
    /// Channel that receives relayed feed posts
    pub news_channel_id: Option<u64>,
    /// Feed accounts relayed into the news channel
    pub followed_accounts: Vec<String>,
    /// Seconds between feed relay passes
    pub poll_interval_secs: u64,
    /// Log level override (error, warn, info, debug, trace)
    pub log_level: Option<String>,
    /// Fixed RNG seed, for reproducible rolls
    pub rng_seed: Option<u64>,
    /// Text file of facts, one per line, for the fact command
    pub facts_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            owner_ids: Vec::new(),
            database_dir: None,
            alias_file: None,
            news_channel_id: None,
            followed_accounts: Vec::new(),
            poll_interval_secs: 60,
            log_level: None,
            rng_seed: None,
            facts_path: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Load settings from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            crate::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Load from the explicit path if given, otherwise the default location
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load(&default_settings_path()?),
        }
    }

    /// Write the settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::Write(e.to_string()))?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Write(e.to_string()))?;
        fs::write(path, content).map_err(|e| SettingsError::Write(e.to_string()))
    }

    /// Database directory, defaulting to `<data_dir>/silva`
    pub fn resolved_database_dir(&self) -> PathBuf {
        self.database_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
        })
    }

    /// Log level from settings, or the build default
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or_else(crate::util::logger::default_level)
    }
}

/// `<config_dir>/silva/settings.json`
pub fn default_settings_path() -> Result<PathBuf, SettingsError> {
    let config_dir = dirs::config_dir().ok_or(SettingsError::ConfigDirNotFound)?;
    Ok(config_dir.join(APP_DIR_NAME).join(DEFAULT_SETTINGS_FILE))
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
