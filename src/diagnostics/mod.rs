// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting editing activity reports.
//!
//! Events are kept in a memory-bounded circular buffer and can be exported
//! as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped user action, warning or error
//! - [`DiagnosticsCollector`]: Owns the buffer and builds reports

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{buffer_capacity_bounds, BufferCapacity, CircularBuffer};
pub use collector::DiagnosticsCollector;
pub use events::{DiagnosticEvent, DiagnosticEventKind, UserAction};
pub use report::{DiagnosticReport, ReportSummary};
