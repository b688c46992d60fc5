// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Export**: Output format, quality and batch naming
//! - **Diagnostics**: Event collection

use crate::diagnostics::buffer_capacity_bounds;
use crate::media::{ExportFormat, ExportQuality};

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default export format.
pub const DEFAULT_EXPORT_FORMAT: ExportFormat = ExportFormat::Jpeg;

/// Default lossy export quality.
pub const DEFAULT_EXPORT_QUALITY: ExportQuality = ExportQuality::High;

/// Base name of batch outputs (`edited_1.jpg`, `edited_2.jpg`, ...).
pub const DEFAULT_BATCH_BASE_NAME: &str = "edited";

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Diagnostics collection is opt-in.
pub const DEFAULT_DIAGNOSTICS_ENABLED: bool = false;

/// Default number of buffered diagnostic events.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;
