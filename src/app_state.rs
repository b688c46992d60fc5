// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using CBOR format.
//!
//! This holds state that should survive across runs but is not a user
//! preference (those live in `settings.toml`). It is stored as `state.cbor`
//! in the data directory (see [`crate::config::paths`]).

use crate::config::paths;
use crate::domain::editing::AdjustmentSet;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Application state that persists across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Adjustments of the last successful export, used by `--resume`.
    #[serde(default)]
    pub last_adjustments: Option<AdjustmentSet>,

    /// Directory of the last export.
    #[serde(default)]
    pub last_output_directory: Option<PathBuf>,
}

impl AppState {
    /// Loads application state from the default location.
    ///
    /// Returns a tuple of (state, optional_warning). If loading fails, returns
    /// default state with a warning explaining what went wrong.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads application state from a custom directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        let warning = match Self::read(&path) {
            Ok(state) => return (state, None),
            Err(err) => format!("cannot load {}: {err}", path.display()),
        };
        log::warn!("{warning}");
        (Self::default(), Some(warning))
    }

    /// Saves application state to the default location.
    ///
    /// Returns an optional warning message if save failed.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves application state to a custom directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("cannot determine the data directory".to_string());
        };

        let warning = match Self::write(self, &path) {
            Ok(()) => return None,
            Err(err) => format!("cannot write {}: {err}", path.display()),
        };
        log::warn!("{warning}");
        Some(warning)
    }

    fn read(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        ciborium::from_reader(BufReader::new(file)).map_err(|e| Error::State(e.to_string()))
    }

    fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        ciborium::into_writer(self, BufWriter::new(file)).map_err(|e| Error::State(e.to_string()))
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }

    /// Records a finished export.
    pub fn record_export(&mut self, adjustments: AdjustmentSet, output_file: &Path) {
        self.last_adjustments = Some(adjustments);
        if let Some(parent) = output_file.parent() {
            self.last_output_directory = Some(parent.to_path_buf());
        }
    }
}
