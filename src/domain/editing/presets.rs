// SPDX-License-Identifier: MPL-2.0
//! Named one-click looks.
//!
//! Each look is a CSS filter string applied after the manual adjustments.

use super::filter::FilterPipeline;
use crate::error::{Error, Result};

/// Built-in looks as `(name, filter)` pairs, in gallery order.
const BUILT_IN: &[(&str, &str)] = &[
    ("None", "none"),
    (
        "Golden Hour",
        "sepia(0.3) saturate(1.2) contrast(0.9) brightness(1.1)",
    ),
    (
        "Forest",
        "contrast(1.1) saturate(1.1) hue-rotate(-10deg) brightness(0.95)",
    ),
    (
        "Ocean Deep",
        "saturate(1.2) contrast(1.1) brightness(1.05) hue-rotate(15deg)",
    ),
    ("Silverstone", "grayscale(1) contrast(1.2) brightness(1.05)"),
    (
        "Pastel Dream",
        "saturate(0.7) contrast(0.9) brightness(1.1) sepia(0.1)",
    ),
    (
        "Urban Cool",
        "grayscale(0.2) contrast(1.1) brightness(0.9) saturate(1.1)",
    ),
    (
        "Retro Film",
        "sepia(0.4) contrast(1.1) brightness(1.05) saturate(1.1)",
    ),
    (
        "Midnight",
        "brightness(0.8) contrast(1.2) saturate(0.9) hue-rotate(10deg)",
    ),
    ("Radiant", "brightness(1.15) contrast(1.05) saturate(1.05)"),
    ("Noir", "grayscale(1) contrast(1.4) brightness(0.9)"),
    ("Technicolor", "saturate(1.8) contrast(1.2) hue-rotate(-20deg)"),
    ("Solarize", "invert(0.8) contrast(1.1)"),
    (
        "Crimson",
        "sepia(0.2) saturate(1.5) hue-rotate(-25deg) contrast(1.1)",
    ),
    (
        "Arctic",
        "saturate(0.1) contrast(1.1) brightness(1.1) sepia(0.1)",
    ),
];

/// A named filter look.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPreset {
    name: String,
    pipeline: FilterPipeline,
}

impl FilterPreset {
    /// Creates a look from a CSS filter string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] if `filter` does not parse.
    pub fn new(name: impl Into<String>, filter: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            pipeline: filter.parse()?,
        })
    }

    /// All built-in looks in gallery order.
    #[must_use]
    pub fn all() -> Vec<FilterPreset> {
        BUILT_IN
            .iter()
            .filter_map(|(name, filter)| Self::new(*name, filter).ok())
            .collect()
    }

    /// Finds a built-in look by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`] if no look has that name.
    pub fn find(name: &str) -> Result<FilterPreset> {
        Self::find_in(&Self::all(), name)
    }

    /// Finds a look by name in `presets`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`] if no look has that name.
    pub fn find_in(presets: &[FilterPreset], name: &str) -> Result<FilterPreset> {
        let wanted = name.trim();
        presets
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }

    /// Merges custom looks over the built-in list.
    ///
    /// A custom look replaces the built-in look of the same name in place;
    /// the others are appended.
    #[must_use]
    pub fn merged_with(custom: Vec<FilterPreset>) -> Vec<FilterPreset> {
        let mut presets = Self::all();
        for preset in custom {
            match presets
                .iter_mut()
                .find(|existing| existing.name.eq_ignore_ascii_case(&preset.name))
            {
                Some(existing) => *existing = preset,
                None => presets.push(preset),
            }
        }
        presets
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }
}
