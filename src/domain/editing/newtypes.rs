// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module names every slider of the adjustment panel and owns the
//! bounds each one is clamped to. Values are `f64` because the blur slider
//! moves in tenths of a pixel and the tonal terms derived from highlights
//! and shadows are halves.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Slider Bounds
// =============================================================================

/// Tonal bounds for exposure, highlights and shadows (-100 to +100).
pub mod tonal_bounds {
    /// Minimum tonal value.
    pub const MIN: f64 = -100.0;
    /// Maximum tonal value.
    pub const MAX: f64 = 100.0;
    /// Neutral tonal value.
    pub const DEFAULT: f64 = 0.0;
}

/// Percentage bounds for contrast and saturation (0% to 200%).
pub mod percent_bounds {
    /// Minimum percentage.
    pub const MIN: f64 = 0.0;
    /// Maximum percentage.
    pub const MAX: f64 = 200.0;
    /// Neutral percentage (unchanged image).
    pub const DEFAULT: f64 = 100.0;
}

/// Amount bounds for sepia, grayscale and invert (0% to 100%).
pub mod amount_bounds {
    /// Minimum amount.
    pub const MIN: f64 = 0.0;
    /// Maximum amount.
    pub const MAX: f64 = 100.0;
    /// Neutral amount (effect disabled).
    pub const DEFAULT: f64 = 0.0;
}

/// Hue rotation bounds in degrees (0 to 360).
pub mod hue_bounds {
    /// Minimum rotation.
    pub const MIN: f64 = 0.0;
    /// Maximum rotation.
    pub const MAX: f64 = 360.0;
    /// Neutral rotation.
    pub const DEFAULT: f64 = 0.0;
}

/// Blur radius bounds in pixels (0 to 10, fractional).
pub mod blur_bounds {
    /// Minimum radius.
    pub const MIN: f64 = 0.0;
    /// Maximum radius.
    pub const MAX: f64 = 10.0;
    /// Neutral radius.
    pub const DEFAULT: f64 = 0.0;
    /// Slider step.
    pub const STEP: f64 = 0.1;
}

// =============================================================================
// SliderRange
// =============================================================================

/// Closed range of a slider together with its neutral value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
    /// Neutral value used by a freshly loaded image.
    pub default: f64,
}

impl SliderRange {
    const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamps a raw slider value into the range.
    ///
    /// NaN cannot be ordered against the bounds, so it falls back to the
    /// neutral value. Infinities clamp to the nearest bound.
    #[must_use]
    pub fn clamp(self, raw: f64) -> f64 {
        if raw.is_nan() {
            return self.default;
        }
        // Adding 0.0 turns a clamped -0.0 into 0.0.
        raw.clamp(self.min, self.max) + 0.0
    }

    /// Returns whether the value lies within the range.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

// =============================================================================
// AdjustmentKind
// =============================================================================

/// One slider of the manual adjustment panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentKind {
    Exposure,
    Highlights,
    Shadows,
    Contrast,
    Saturation,
    Sepia,
    Grayscale,
    Invert,
    HueRotate,
    Blur,
}

impl AdjustmentKind {
    /// All sliders in panel order.
    pub const ALL: [AdjustmentKind; 10] = [
        AdjustmentKind::Exposure,
        AdjustmentKind::Highlights,
        AdjustmentKind::Shadows,
        AdjustmentKind::Contrast,
        AdjustmentKind::Saturation,
        AdjustmentKind::Sepia,
        AdjustmentKind::Grayscale,
        AdjustmentKind::Invert,
        AdjustmentKind::HueRotate,
        AdjustmentKind::Blur,
    ];

    /// Returns the declared range of this slider.
    #[must_use]
    pub fn range(self) -> SliderRange {
        match self {
            Self::Exposure | Self::Highlights | Self::Shadows => SliderRange::new(
                tonal_bounds::MIN,
                tonal_bounds::MAX,
                tonal_bounds::DEFAULT,
            ),
            Self::Contrast | Self::Saturation => SliderRange::new(
                percent_bounds::MIN,
                percent_bounds::MAX,
                percent_bounds::DEFAULT,
            ),
            Self::Sepia | Self::Grayscale | Self::Invert => SliderRange::new(
                amount_bounds::MIN,
                amount_bounds::MAX,
                amount_bounds::DEFAULT,
            ),
            Self::HueRotate => {
                SliderRange::new(hue_bounds::MIN, hue_bounds::MAX, hue_bounds::DEFAULT)
            }
            Self::Blur => SliderRange::new(blur_bounds::MIN, blur_bounds::MAX, blur_bounds::DEFAULT),
        }
    }

    /// Clamps a raw value to this slider's range.
    #[must_use]
    pub fn clamp(self, raw: f64) -> f64 {
        self.range().clamp(raw)
    }

    /// Serialized field name (matches the persisted adjustment records).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Exposure => "exposure",
            Self::Highlights => "highlights",
            Self::Shadows => "shadows",
            Self::Contrast => "contrast",
            Self::Saturation => "saturate",
            Self::Sepia => "sepia",
            Self::Grayscale => "grayscale",
            Self::Invert => "invert",
            Self::HueRotate => "hueRotate",
            Self::Blur => "blur",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Exposure => "Exposure",
            Self::Highlights => "Highlights",
            Self::Shadows => "Shadows",
            Self::Contrast => "Contrast",
            Self::Saturation => "Saturation",
            Self::Sepia => "Sepia",
            Self::Grayscale => "Grayscale",
            Self::Invert => "Invert",
            Self::HueRotate => "Hue Rotate",
            Self::Blur => "Blur",
        }
    }

    /// Display unit of the slider value.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Exposure | Self::Highlights | Self::Shadows => "",
            Self::Contrast | Self::Saturation | Self::Sepia | Self::Grayscale | Self::Invert => {
                "%"
            }
            Self::HueRotate => "deg",
            Self::Blur => "px",
        }
    }

    /// Slider increment.
    #[must_use]
    pub fn step(self) -> f64 {
        match self {
            Self::Blur => blur_bounds::STEP,
            _ => 1.0,
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdjustmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exposure" => Ok(Self::Exposure),
            "highlights" => Ok(Self::Highlights),
            "shadows" => Ok(Self::Shadows),
            "contrast" => Ok(Self::Contrast),
            "saturate" | "saturation" => Ok(Self::Saturation),
            "sepia" => Ok(Self::Sepia),
            "grayscale" => Ok(Self::Grayscale),
            "invert" => Ok(Self::Invert),
            "huerotate" | "hue-rotate" | "hue_rotate" => Ok(Self::HueRotate),
            "blur" => Ok(Self::Blur),
            _ => Err(Error::UnknownAdjustment(s.to_string())),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
