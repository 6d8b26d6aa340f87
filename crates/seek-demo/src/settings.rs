//! Demo settings - persisted shell preferences.
//!
//! Settings are loaded from the user's config directory at startup. A missing
//! or unreadable file yields the defaults; command-line flags override them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use seek_core::{LifecycleOptions, WindowConfig};

use crate::logging::LogFormat;

// =============================================================================
// ROOT SETTINGS
// =============================================================================

/// Shell settings, serialized to TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Main window setup.
    pub window: WindowConfig,

    /// Orchestrator tunables.
    pub lifecycle: LifecycleOptions,

    /// Log output.
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| match toml::from_str(&content) {
                Ok(settings) => Some(settings),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "Ignoring invalid settings file");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Save settings to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("write settings to {}", path.display()))
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "Seek", "seek-demo")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}

// =============================================================================
// LOGGING
// =============================================================================

/// Log level names accepted in the settings file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Write each session to a timestamped file in `directory`.
    pub to_file: bool,
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            to_file: false,
            directory: PathBuf::from("log"),
        }
    }
}
