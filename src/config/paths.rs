// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`LENS_ADJUST_DATA_DIR`, `LENS_ADJUST_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "LensAdjust";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "LENS_ADJUST_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LENS_ADJUST_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for data and config directories.
///
/// Only the first call has an effect; later calls are ignored with a
/// warning.
pub fn init_cli_overrides(data_dir: Option<PathBuf>, config_dir: Option<PathBuf>) {
    if CLI_DATA_DIR.set(data_dir).is_err() || CLI_CONFIG_DIR.set(config_dir).is_err() {
        log::warn!("directory overrides already initialized, ignoring");
    }
}

fn get_cli_data_dir() -> Option<PathBuf> {
    CLI_DATA_DIR.get().and_then(Clone::clone)
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

fn get_env_dir(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the application data directory (holds `state.cbor`).
///
/// Platform defaults:
/// - Linux: `~/.local/share/LensAdjust/`
/// - macOS: `~/Library/Application Support/LensAdjust/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\LensAdjust\`
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory with an optional override.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .or_else(get_cli_data_dir)
        .or_else(|| get_env_dir(ENV_DATA_DIR))
        .or_else(|| {
            dirs::data_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}

/// Returns the application config directory (holds `settings.toml`).
///
/// Platform defaults:
/// - Linux: `~/.config/LensAdjust/`
/// - macOS: `~/Library/Application Support/LensAdjust/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\LensAdjust\`
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .or_else(get_cli_config_dir)
        .or_else(|| get_env_dir(ENV_CONFIG_DIR))
        .or_else(|| {
            dirs::config_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}
