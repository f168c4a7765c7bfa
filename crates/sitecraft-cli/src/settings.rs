//! CLI settings - where state lives and how styles are pumped.
//!
//! Settings are read from `sitecraft.toml` in the platform config directory.
//! A missing or malformed file yields the defaults; command-line flags
//! override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sitecraft_config::FileStorage;
use sitecraft_events::FRAME_INTERVAL;
use tracing::{debug, warn};

/// File name of the settings file.
pub const SETTINGS_FILE: &str = "sitecraft.toml";

/// Longest accepted style debounce window, in milliseconds.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

// =============================================================================
// ROOT SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub styles: StyleSettings,
    pub content: ContentSettings,
}

impl Settings {
    /// Load settings from `path`, falling back to the defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                debug!(path = %path.display(), %error, "no settings file, using defaults");
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(error) => {
                warn!(path = %path.display(), %error, "malformed settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create settings directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        fs::write(path, content).with_context(|| format!("write settings {}", path.display()))
    }

    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "Sitecraft", "Sitecraft")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Directory holding the persisted configuration.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(FileStorage::default_dir)
    }

    /// Debounce window, capped at [`MAX_DEBOUNCE_MS`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.styles.debounce_ms.min(MAX_DEBOUNCE_MS))
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Trailing debounce window for style application, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            debounce_ms: u64::try_from(FRAME_INTERVAL.as_millis()).unwrap_or(16),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// JSON content catalog used for navigation dropdowns.
    pub catalog: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.debounce(), FRAME_INTERVAL);
        assert_eq!(settings.storage_dir(), FileStorage::default_dir());
        assert!(settings.content.catalog.is_none());
    }

    #[test]
    fn test_debounce_is_capped() {
        let mut settings = Settings::default();
        settings.styles.debounce_ms = u64::MAX;
        assert_eq!(settings.debounce(), Duration::from_millis(MAX_DEBOUNCE_MS));
    }

    #[test]
    fn test_partial_toml() {
        let settings: Settings = toml::from_str("[styles]\ndebounce_ms = 40\n").unwrap();
        assert_eq!(settings.debounce(), Duration::from_millis(40));
        assert_eq!(settings.storage, StorageSettings::default());
    }
}
