// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides the pure adjustment model:
//! - [`AdjustmentKind`]: the sliders and their bounds
//! - [`AdjustmentSet`]: one value per slider, always in range
//! - [`FilterPipeline`]: the ordered filter composed from a set
//! - [`HistoryStack`]: linear undo/redo history
//! - [`AdjustmentEngine`]: live set plus committed history
//! - [`FilterPreset`]: named one-click looks

pub mod adjustments;
pub mod engine;
pub mod filter;
pub mod history;
pub mod newtypes;
pub mod presets;

pub use adjustments::AdjustmentSet;
pub use engine::AdjustmentEngine;
pub use filter::{compose_filter, FilterPipeline, FilterTerm};
pub use history::HistoryStack;
pub use newtypes::{AdjustmentKind, SliderRange};
pub use presets::FilterPreset;
