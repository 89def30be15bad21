//! Shared utilities for the bot.
//!
//! - `settings`: JSON settings file and its defaults
//! - `logger`: stdout backend for the `log` facade

pub mod logger;
mod settings;

pub use settings::{default_settings_path, Settings, SettingsError, APP_DIR_NAME};
