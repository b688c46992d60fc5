// SPDX-License-Identifier: MPL-2.0
//! Editing session orchestration.
//!
//! The session ties the adjustment engine to the image-level edit history
//! (AI edits, applied looks, adjustment snapshots) and records user actions
//! for diagnostics.

mod session;

pub use session::{EditKind, EditSession, SessionEntry};
