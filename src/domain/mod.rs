// SPDX-License-Identifier: MPL-2.0
//! Domain layer - adjustment model with no I/O.
//!
//! Everything here is deterministic and synchronous: slider bounds, the
//! filter compositor and the undo/redo history. Pixels, files and
//! diagnostics live in the outer layers.
//!
//! # Modules
//!
//! - [`editing`]: Adjustment types ([`AdjustmentSet`](editing::AdjustmentSet),
//!   [`AdjustmentEngine`](editing::AdjustmentEngine),
//!   [`FilterPipeline`](editing::FilterPipeline))

pub mod editing;
