// SPDX-License-Identifier: MPL-2.0
//! `lens_adjust` is a non-destructive photo adjustment engine.
//!
//! Bounded sliders are composed into an ordered CSS-style filter pipeline,
//! slider gestures are recorded in an undo/redo history, and pipelines can be
//! rendered and exported with the `image` crate.
//!
//! # Example
//!
//! ```
//! use lens_adjust::domain::editing::{AdjustmentEngine, AdjustmentKind};
//!
//! let mut engine = AdjustmentEngine::new();
//! engine.set_value(AdjustmentKind::Contrast, 140.0);
//! engine.commit();
//! assert!(engine.filter().to_css().contains("contrast(140%)"));
//!
//! engine.undo();
//! assert!(engine.current().is_neutral());
//! ```

pub mod app_state;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod editor;
pub mod error;
pub mod media;
