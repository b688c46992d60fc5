// SPDX-License-Identifier: MPL-2.0
//! Filter composition.
//!
//! [`compose_filter`] turns an [`AdjustmentSet`] into an ordered
//! [`FilterPipeline`]. The pipeline prints as a CSS `filter` expression and
//! can be parsed back from one, which is how the named looks in
//! [`presets`](super::presets) are defined.
//!
//! Order is significant: every term is applied to the output of the one
//! before it.

use super::adjustments::AdjustmentSet;
use crate::error::Error;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// A single filter function.
///
/// Amount-style terms carry a percentage (100 = unchanged for brightness,
/// contrast and saturate; 0 = disabled for sepia, grayscale and invert).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterTerm {
    Brightness(f64),
    Contrast(f64),
    Saturate(f64),
    Sepia(f64),
    Grayscale(f64),
    /// Gaussian blur radius in pixels.
    Blur(f64),
    /// Hue rotation in degrees.
    HueRotate(f64),
    Invert(f64),
}

impl FilterTerm {
    /// CSS function name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
            Self::Saturate(_) => "saturate",
            Self::Sepia(_) => "sepia",
            Self::Grayscale(_) => "grayscale",
            Self::Blur(_) => "blur",
            Self::HueRotate(_) => "hue-rotate",
            Self::Invert(_) => "invert",
        }
    }

    /// Numeric argument in the unit the term prints with.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Brightness(v)
            | Self::Contrast(v)
            | Self::Saturate(v)
            | Self::Sepia(v)
            | Self::Grayscale(v)
            | Self::Blur(v)
            | Self::HueRotate(v)
            | Self::Invert(v) => v,
        }
    }

    /// Returns true if the term leaves every pixel unchanged.
    #[must_use]
    pub fn is_identity(self) -> bool {
        match self {
            Self::Brightness(v) | Self::Contrast(v) | Self::Saturate(v) => v == 100.0,
            Self::Sepia(v) | Self::Grayscale(v) | Self::Invert(v) | Self::Blur(v) => v == 0.0,
            Self::HueRotate(v) => v.rem_euclid(360.0) == 0.0,
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Self::Blur(_) => "px",
            Self::HueRotate(_) => "deg",
            _ => "%",
        }
    }

    fn parse(name: &str, arg: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidFilter(format!("{name}({arg})"));
        let term = match name.to_ascii_lowercase().as_str() {
            "brightness" => Self::Brightness(parse_amount(arg).ok_or_else(invalid)?),
            "contrast" => Self::Contrast(parse_amount(arg).ok_or_else(invalid)?),
            "saturate" => Self::Saturate(parse_amount(arg).ok_or_else(invalid)?),
            "sepia" => Self::Sepia(parse_amount(arg).ok_or_else(invalid)?),
            "grayscale" => Self::Grayscale(parse_amount(arg).ok_or_else(invalid)?),
            "invert" => Self::Invert(parse_amount(arg).ok_or_else(invalid)?),
            "blur" => Self::Blur(parse_length(arg).ok_or_else(invalid)?),
            "hue-rotate" => Self::HueRotate(parse_angle(arg).ok_or_else(invalid)?),
            _ => return Err(Error::InvalidFilter(format!("unknown filter function `{name}`"))),
        };
        Ok(term)
    }
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `+ 0.0` folds -0.0 into 0.0 so output never reads "-0".
        write!(f, "{}({}{})", self.name(), self.value() + 0.0, self.unit())
    }
}

/// Parses `120%`, `1.2` or an empty argument (CSS default of 100%).
fn parse_amount(arg: &str) -> Option<f64> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Some(100.0);
    }
    let value = match arg.strip_suffix('%') {
        Some(percent) => parse_number(percent)?,
        None => parse_hundredths(arg)?,
    };
    (value >= 0.0).then_some(value)
}

/// Parses `4px` or a bare number of pixels.
fn parse_length(arg: &str) -> Option<f64> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Some(0.0);
    }
    let value = parse_number(arg.strip_suffix("px").unwrap_or(arg))?;
    (value >= 0.0).then_some(value)
}

/// Parses an angle into degrees. Negative angles are allowed.
fn parse_angle(arg: &str) -> Option<f64> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Some(0.0);
    }
    let degrees = if let Some(deg) = arg.strip_suffix("deg") {
        parse_number(deg)
    } else if let Some(grad) = arg.strip_suffix("grad") {
        parse_number(grad).map(|v| v * 0.9)
    } else if let Some(rad) = arg.strip_suffix("rad") {
        parse_number(rad).map(|v| v * 180.0 / PI)
    } else if let Some(turn) = arg.strip_suffix("turn") {
        parse_number(turn).map(|v| v * 360.0)
    } else {
        parse_number(arg)
    };
    degrees.filter(|v| v.is_finite())
}

/// Parses a unit amount as a percentage (`0.3` -> `30`).
///
/// Shifting the decimal exponent in the text keeps the result exact where
/// multiplying by 100 would not (`0.3 * 100.0 != 30.0`).
fn parse_hundredths(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.contains(|c: char| c == 'e' || c == 'E') {
        return parse_number(text)
            .map(|v| v * 100.0)
            .filter(|v| v.is_finite());
    }
    parse_number(&format!("{text}e2"))
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// FilterPipeline
// =============================================================================

/// Ordered list of filter terms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterPipeline {
    terms: Vec<FilterTerm>,
}

impl FilterPipeline {
    /// Creates a pipeline from terms in application order.
    #[must_use]
    pub fn new(terms: Vec<FilterTerm>) -> Self {
        Self { terms }
    }

    /// Terms in application order.
    #[must_use]
    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no term changes any pixel.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.terms.iter().all(|term| term.is_identity())
    }

    /// Appends a term.
    pub fn push(&mut self, term: FilterTerm) {
        self.terms.push(term);
    }

    /// Returns a pipeline applying `self` and then `next`.
    #[must_use]
    pub fn then(mut self, next: &FilterPipeline) -> Self {
        self.terms.extend_from_slice(&next.terms);
        self
    }

    /// Renders the pipeline as a CSS `filter` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FilterPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("none");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl FromStr for FilterPipeline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Self::default());
        }

        let mut terms = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            let open = rest
                .find('(')
                .ok_or_else(|| Error::InvalidFilter(format!("expected `(` in `{rest}`")))?;
            let close = rest[open..]
                .find(')')
                .map(|offset| open + offset)
                .ok_or_else(|| Error::InvalidFilter(format!("unclosed `(` in `{rest}`")))?;

            let name = rest[..open].trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(Error::InvalidFilter(format!("bad function name `{name}`")));
            }
            terms.push(FilterTerm::parse(name, &rest[open + 1..close])?);
            rest = rest[close + 1..].trim_start();
        }
        Ok(Self { terms })
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Composes the slider values into the fixed eight-term pipeline.
///
/// Highlights and shadows have no direct filter function; they are folded
/// into brightness and contrast:
///
/// - `brightness = 100 + exposure + highlights/2 + shadows/2`
/// - `contrast   = contrast + highlights/2 - shadows/2`
///
/// Both are floored at 0. The output depends on nothing but `set`.
#[must_use]
pub fn compose_filter(set: &AdjustmentSet) -> FilterPipeline {
    let half_highlights = set.highlights() / 2.0;
    let half_shadows = set.shadows() / 2.0;
    let brightness = (100.0 + set.exposure() + half_highlights + half_shadows).max(0.0);
    let contrast = (set.contrast() + half_highlights - half_shadows).max(0.0);

    FilterPipeline::new(vec![
        FilterTerm::Brightness(brightness),
        FilterTerm::Contrast(contrast),
        FilterTerm::Saturate(set.saturation()),
        FilterTerm::Sepia(set.sepia()),
        FilterTerm::Grayscale(set.grayscale()),
        FilterTerm::Blur(set.blur()),
        FilterTerm::HueRotate(set.hue_rotate()),
        FilterTerm::Invert(set.invert()),
    ])
}
