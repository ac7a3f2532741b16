//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` fills missing fields from `Default`, so a config
//! file only needs the keys a user actually changed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runner::DEFAULT_RUNNER;

/// Main editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Typing and completion behavior
    pub editor: EditorConfig,

    /// Interpreter settings
    pub runner: RunnerConfig,

    /// Window and appearance settings
    pub ui: UiConfig,
}

impl Config {
    /// Loads config from the default location.
    ///
    /// A missing file gives the defaults; an unreadable one is reported and
    /// also gives the defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("uaide").join("config.toml"))
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Typing and completion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Auto-close brackets and quotes
    pub auto_pair: bool,

    /// Show keyword suggestions while typing
    pub autocomplete: bool,

    /// Longest suggestion list
    pub max_suggestions: usize,

    /// Undo history limit
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_pair: true,
            autocomplete: true,
            max_suggestions: 50,
            max_history: 1000,
        }
    }
}

/// Interpreter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Executable looked up on `PATH`
    pub command: String,

    /// Where run scripts are written; the system temp dir when unset
    pub temp_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_RUNNER.to_string(),
            temp_dir: None,
        }
    }
}

/// UI appearance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Color theme name
    pub theme: String,

    /// Font size in points
    pub font_size: f32,

    pub window_width: f32,
    pub window_height: f32,

    /// Height of the output log
    pub log_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            font_size: 12.0,
            window_width: 900.0,
            window_height: 700.0,
            log_height: 200.0,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
