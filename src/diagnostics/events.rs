// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-initiated actions worth keeping for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Image Actions
    // ==========================================================================
    /// A new image became the editing base.
    LoadImage,

    /// An external edit replaced the base image.
    ReplaceBase {
        /// History label of the new entry (e.g. `AI Prompt`).
        label: String,
    },

    /// Jumped to an entry of the edit history.
    RevertHistory {
        /// Index of the entry reverted to.
        index: usize,
    },

    // ==========================================================================
    // Adjustment Actions
    // ==========================================================================
    /// A slider was set outside of an interactive gesture.
    SetAdjustment {
        /// Serialized slider name.
        adjustment: String,
        /// Stored (clamped) value.
        value: f64,
    },

    /// An adjustment gesture ended with a change.
    CommitAdjustments,

    /// Undo of the last committed adjustment.
    UndoAdjustment,

    /// Redo of an undone adjustment.
    RedoAdjustment,

    /// All sliders returned to their defaults.
    ResetAdjustments,

    /// Adjustments recorded as an edit history entry.
    SnapshotAdjustments,

    /// A named look was applied.
    ApplyPreset {
        name: String,
    },

    // ==========================================================================
    // Export Actions
    // ==========================================================================
    /// A rendered image was written.
    ExportImage {
        /// Export format name (`jpeg`, `png`, `webp`).
        format: String,
    },
}

/// Kinds of diagnostic events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        #[serde(flatten)]
        action: UserAction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Warning {
        message: String,
    },
    Error {
        message: String,
    },
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_action_serializes_with_tags() {
        let event = DiagnosticEvent::new(DiagnosticEventKind::UserAction {
            action: UserAction::ApplyPreset {
                name: "Noir".into(),
            },
            details: None,
        });
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "user_action");
        assert_eq!(json["action"], "apply_preset");
        assert_eq!(json["name"], "Noir");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn warning_round_trips_through_json() {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            message: "state file unreadable".into(),
        });
        let json = serde_json::to_string(&event).expect("serialize");
        let back: DiagnosticEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}
