// SPDX-License-Identifier: MPL-2.0
//! Loading and saving user preferences to a `settings.toml` file.
//!
//! Unknown or malformed files fall back to defaults rather than failing
//! startup; an explicit path (CLI flag or `SLIDEKICK_CONFIG_DIR`) takes
//! precedence over the platform config directory.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SlideKick";
const CONFIG_DIR_ENV: &str = "SLIDEKICK_CONFIG_DIR";

/// Default completion threshold as a fraction of the track width.
pub const DEFAULT_THRESHOLD_FRACTION: f32 = 0.6;
/// Default cool-down before a confirmed swipe control resets, in ms.
pub const DEFAULT_RESET_DELAY_MS: u64 = 2000;
/// Page opened by the web experience screen when none is configured.
pub const DEFAULT_HOME_URL: &str = "https://houseofedtech.in";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub language: Option<String>,
    /// Gate for the local notification scheduler.
    #[serde(default)]
    pub notifications_enabled: Option<bool>,
    /// Whether streams start playing as soon as they load.
    #[serde(default)]
    pub video_autoplay: Option<bool>,
    /// Swipe completion threshold, fraction of the track width in `(0, 1]`.
    #[serde(default)]
    pub threshold_fraction: Option<f32>,
    /// Cool-down after a completed swipe, in milliseconds.
    #[serde(default)]
    pub reset_delay_ms: Option<u64>,
    /// Start page for the web experience screen.
    #[serde(default)]
    pub home_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            notifications_enabled: Some(true),
            video_autoplay: Some(false),
            threshold_fraction: Some(DEFAULT_THRESHOLD_FRACTION),
            reset_delay_ms: Some(DEFAULT_RESET_DELAY_MS),
            home_url: None,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Path of the settings file inside an explicit directory override.
#[must_use]
pub fn path_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            language: Some("fr".to_string()),
            notifications_enabled: Some(false),
            video_autoplay: Some(true),
            threshold_fraction: Some(0.75),
            reset_delay_ms: Some(1500),
            home_url: Some("https://example.com".to_string()),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.language, config.language);
        assert_eq!(loaded.notifications_enabled, config.notifications_enabled);
        assert_eq!(loaded.threshold_fraction, config.threshold_fraction);
        assert_eq!(loaded.reset_delay_ms, config.reset_delay_ms);
        assert_eq!(loaded.home_url, config.home_url);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_config_enables_notifications_and_standard_gesture() {
        let config = Config::default();
        assert_eq!(config.notifications_enabled, Some(true));
        assert_eq!(config.threshold_fraction, Some(DEFAULT_THRESHOLD_FRACTION));
        assert_eq!(config.reset_delay_ms, Some(DEFAULT_RESET_DELAY_MS));
    }
}
