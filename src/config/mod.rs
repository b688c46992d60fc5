// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[export]` - Output format and quality
//! - `[diagnostics]` - Event collection
//! - `[presets]` - Custom looks (`[[presets.custom]]` with `name` and `filter`)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `LENS_ADJUST_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lens_adjust::config::{self, Config};
//! use lens_adjust::media::ExportQuality;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.export.quality = ExportQuality::Medium;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::diagnostics::BufferCapacity;
use crate::domain::editing::FilterPreset;
use crate::error::{Error, Result};
use crate::media::{ExportFormat, ExportQuality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// Output format when the output path does not name one.
    #[serde(default = "default_export_format")]
    pub format: ExportFormat,

    /// Lossy encoder quality.
    #[serde(default = "default_export_quality")]
    pub quality: ExportQuality,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_EXPORT_FORMAT,
            quality: DEFAULT_EXPORT_QUALITY,
        }
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Whether user actions are collected.
    #[serde(default)]
    pub enabled: bool,

    /// Number of events kept (clamped to 100–10000 when used).
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

impl DiagnosticsConfig {
    /// Validated buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> BufferCapacity {
        BufferCapacity::new(self.buffer_capacity)
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_DIAGNOSTICS_ENABLED,
            buffer_capacity: DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY,
        }
    }
}

/// A user-defined look.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomPreset {
    pub name: String,
    /// CSS filter string, e.g. `sepia(40%) contrast(110%)`.
    pub filter: String,
}

/// Custom looks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresetsConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<CustomPreset>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    #[serde(default)]
    pub presets: PresetsConfig,
}

impl Config {
    /// Parses the custom looks, skipping (and logging) invalid ones.
    #[must_use]
    pub fn custom_presets(&self) -> Vec<FilterPreset> {
        self.presets
            .custom
            .iter()
            .filter_map(
                |custom| match FilterPreset::new(custom.name.clone(), &custom.filter) {
                    Ok(preset) => Some(preset),
                    Err(err) => {
                        log::warn!("ignoring custom look `{}`: {err}", custom.name);
                        None
                    }
                },
            )
            .collect()
    }

    /// Built-in looks with the custom looks merged over them.
    #[must_use]
    pub fn presets(&self) -> Vec<FilterPreset> {
        FilterPreset::merged_with(self.custom_presets())
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_export_format() -> ExportFormat {
    DEFAULT_EXPORT_FORMAT
}

fn default_export_quality() -> ExportQuality {
    DEFAULT_EXPORT_QUALITY
}

fn default_buffer_capacity() -> usize {
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). A missing file yields the
/// defaults silently; an unreadable or invalid one yields the defaults and a
/// warning.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    let warning = format!("{}: {err}; using defaults", path.display());
                    log::warn!("{warning}");
                    return (Config::default(), Some(warning));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            export: ExportConfig {
                format: ExportFormat::Webp,
                quality: ExportQuality::Low,
            },
            diagnostics: DiagnosticsConfig {
                enabled: true,
                buffer_capacity: 250,
            },
            presets: PresetsConfig {
                custom: vec![CustomPreset {
                    name: "Warm".into(),
                    filter: "sepia(20%) saturate(120%)".into(),
                }],
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(message)) => assert!(!message.is_empty()),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_warns_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[export]\nformat = \"gif\"\n")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_sections_use_defaults() {
        let config: Config = toml::from_str("[export]\nquality = \"medium\"\n").expect("parse");
        assert_eq!(config.export.format, DEFAULT_EXPORT_FORMAT);
        assert_eq!(config.export.quality, ExportQuality::Medium);
        assert_eq!(config.diagnostics, DiagnosticsConfig::default());
        assert!(config.presets.custom.is_empty());
    }

    #[test]
    fn custom_presets_shadow_built_ins_and_skip_invalid() {
        let config: Config = toml::from_str(
            r#"
            [[presets.custom]]
            name = "noir"
            filter = "grayscale(100%)"

            [[presets.custom]]
            name = "Broken"
            filter = "glow(3)"

            [[presets.custom]]
            name = "Faded"
            filter = "contrast(80%) saturate(70%)"
            "#,
        )
        .expect("parse");

        assert_eq!(config.custom_presets().len(), 2);
        let presets = config.presets();
        let noir = FilterPreset::find_in(&presets, "Noir").expect("noir present");
        assert_eq!(noir.pipeline().to_css(), "grayscale(100%)");
        assert!(FilterPreset::find_in(&presets, "Faded").is_ok());
        assert!(FilterPreset::find_in(&presets, "Broken").is_err());
    }

    #[test]
    fn diagnostics_capacity_is_clamped() {
        let config = DiagnosticsConfig {
            enabled: true,
            buffer_capacity: 5,
        };
        assert_eq!(config.capacity().value(), 100);
    }
}
