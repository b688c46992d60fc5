// SPDX-License-Identifier: MPL-2.0
//! The set of slider values applied to the displayed image.

use super::newtypes::AdjustmentKind;
use serde::{Deserialize, Serialize};

/// Values of every adjustment slider.
///
/// Each field is guaranteed to lie within the range declared by its
/// [`AdjustmentKind`]; writes go through [`AdjustmentSet::set`], which clamps
/// instead of rejecting. Deserialized sets are clamped the same way, so a
/// hand-edited state file cannot smuggle in an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAdjustments", into = "RawAdjustments")]
pub struct AdjustmentSet {
    exposure: f64,
    highlights: f64,
    shadows: f64,
    contrast: f64,
    saturation: f64,
    sepia: f64,
    grayscale: f64,
    blur: f64,
    hue_rotate: f64,
    invert: f64,
}

impl AdjustmentSet {
    /// The neutral set: every slider at its default, the image unchanged.
    pub const NEUTRAL: AdjustmentSet = AdjustmentSet {
        exposure: 0.0,
        highlights: 0.0,
        shadows: 0.0,
        contrast: 100.0,
        saturation: 100.0,
        sepia: 0.0,
        grayscale: 0.0,
        blur: 0.0,
        hue_rotate: 0.0,
        invert: 0.0,
    };

    /// Returns the value of a slider.
    #[must_use]
    pub fn get(&self, kind: AdjustmentKind) -> f64 {
        match kind {
            AdjustmentKind::Exposure => self.exposure,
            AdjustmentKind::Highlights => self.highlights,
            AdjustmentKind::Shadows => self.shadows,
            AdjustmentKind::Contrast => self.contrast,
            AdjustmentKind::Saturation => self.saturation,
            AdjustmentKind::Sepia => self.sepia,
            AdjustmentKind::Grayscale => self.grayscale,
            AdjustmentKind::Invert => self.invert,
            AdjustmentKind::HueRotate => self.hue_rotate,
            AdjustmentKind::Blur => self.blur,
        }
    }

    /// Sets a slider, clamping `raw` to its range. Returns the stored value.
    pub fn set(&mut self, kind: AdjustmentKind, raw: f64) -> f64 {
        let value = kind.clamp(raw);
        let slot = match kind {
            AdjustmentKind::Exposure => &mut self.exposure,
            AdjustmentKind::Highlights => &mut self.highlights,
            AdjustmentKind::Shadows => &mut self.shadows,
            AdjustmentKind::Contrast => &mut self.contrast,
            AdjustmentKind::Saturation => &mut self.saturation,
            AdjustmentKind::Sepia => &mut self.sepia,
            AdjustmentKind::Grayscale => &mut self.grayscale,
            AdjustmentKind::Invert => &mut self.invert,
            AdjustmentKind::HueRotate => &mut self.hue_rotate,
            AdjustmentKind::Blur => &mut self.blur,
        };
        *slot = value;
        value
    }

    /// Builder form of [`AdjustmentSet::set`].
    #[must_use]
    pub fn with(mut self, kind: AdjustmentKind, raw: f64) -> Self {
        self.set(kind, raw);
        self
    }

    /// Returns true if every slider sits at its neutral value.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Iterates over `(kind, value)` pairs in panel order.
    pub fn iter(&self) -> impl Iterator<Item = (AdjustmentKind, f64)> + '_ {
        AdjustmentKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    pub fn exposure(&self) -> f64 {
        self.exposure
    }

    pub fn highlights(&self) -> f64 {
        self.highlights
    }

    pub fn shadows(&self) -> f64 {
        self.shadows
    }

    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn sepia(&self) -> f64 {
        self.sepia
    }

    pub fn grayscale(&self) -> f64 {
        self.grayscale
    }

    pub fn blur(&self) -> f64 {
        self.blur
    }

    pub fn hue_rotate(&self) -> f64 {
        self.hue_rotate
    }

    pub fn invert(&self) -> f64 {
        self.invert
    }
}

impl Default for AdjustmentSet {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Wire form of [`AdjustmentSet`]. Missing fields take their neutral value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAdjustments {
    #[serde(default = "tonal_default")]
    exposure: f64,
    #[serde(default = "tonal_default")]
    highlights: f64,
    #[serde(default = "tonal_default")]
    shadows: f64,
    #[serde(default = "percent_default")]
    contrast: f64,
    #[serde(default = "percent_default")]
    saturate: f64,
    #[serde(default)]
    sepia: f64,
    #[serde(default)]
    grayscale: f64,
    #[serde(default)]
    blur: f64,
    #[serde(default)]
    hue_rotate: f64,
    #[serde(default)]
    invert: f64,
}

fn tonal_default() -> f64 {
    AdjustmentKind::Exposure.range().default
}

fn percent_default() -> f64 {
    AdjustmentKind::Contrast.range().default
}

impl From<RawAdjustments> for AdjustmentSet {
    fn from(raw: RawAdjustments) -> Self {
        AdjustmentSet::NEUTRAL
            .with(AdjustmentKind::Exposure, raw.exposure)
            .with(AdjustmentKind::Highlights, raw.highlights)
            .with(AdjustmentKind::Shadows, raw.shadows)
            .with(AdjustmentKind::Contrast, raw.contrast)
            .with(AdjustmentKind::Saturation, raw.saturate)
            .with(AdjustmentKind::Sepia, raw.sepia)
            .with(AdjustmentKind::Grayscale, raw.grayscale)
            .with(AdjustmentKind::Blur, raw.blur)
            .with(AdjustmentKind::HueRotate, raw.hue_rotate)
            .with(AdjustmentKind::Invert, raw.invert)
    }
}

impl From<AdjustmentSet> for RawAdjustments {
    fn from(set: AdjustmentSet) -> Self {
        Self {
            exposure: set.exposure,
            highlights: set.highlights,
            shadows: set.shadows,
            contrast: set.contrast,
            saturate: set.saturation,
            sepia: set.sepia,
            grayscale: set.grayscale,
            blur: set.blur,
            hue_rotate: set.hue_rotate,
            invert: set.invert,
        }
    }
}
