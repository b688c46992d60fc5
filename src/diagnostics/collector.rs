// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector.
//!
//! Editing runs on a single thread, so the collector is owned directly by
//! whoever drives the session and events go straight into the ring buffer.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use super::report::DiagnosticReport;
use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, UserAction};
use crate::error::Result;

/// Stores diagnostic events in a bounded buffer.
#[derive(Debug, Clone)]
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    started_at: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            buffer: CircularBuffer::new(capacity),
            started_at: Utc::now(),
        }
    }

    /// Records a user action.
    pub fn log_action(&mut self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    /// Records a user action with free-form details.
    pub fn log_action_with_details(&mut self, action: UserAction, details: Option<String>) {
        self.push(DiagnosticEventKind::UserAction { action, details });
    }

    /// Records a warning.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.push(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    /// Records an error.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.push(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }

    fn push(&mut self, kind: DiagnosticEventKind) {
        self.buffer.push(DiagnosticEvent::new(kind));
    }

    /// Stored events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// When collection started.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Builds a report from the buffered events.
    #[must_use]
    pub fn build_report(&self) -> DiagnosticReport {
        DiagnosticReport::from_events(self.started_at, self.buffer.iter().cloned().collect())
    }

    /// Writes a JSON report to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = self.build_report().to_json()?;
        fs::write(path, json)?;
        log::info!("diagnostics report written ({} events)", self.len());
        Ok(())
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn logs_actions_in_order() {
        let mut collector = DiagnosticsCollector::default();
        collector.log_action(UserAction::LoadImage);
        collector.log_action(UserAction::CommitAdjustments);
        collector.log_warning("low disk space");

        let kinds: Vec<_> = collector.events().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds.len(), 3);
        assert!(matches!(
            kinds[0],
            DiagnosticEventKind::UserAction {
                action: UserAction::LoadImage,
                ..
            }
        ));
        assert!(matches!(kinds[2], DiagnosticEventKind::Warning { .. }));
    }

    #[test]
    fn respects_buffer_capacity() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(0));
        for _ in 0..250 {
            collector.log_action(UserAction::UndoAdjustment);
        }
        assert_eq!(collector.len(), 100);
    }

    #[test]
    fn export_writes_json_report() {
        let mut collector = DiagnosticsCollector::default();
        collector.log_action(UserAction::ExportImage {
            format: "png".into(),
        });
        collector.log_error("encode failed");

        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("reports").join("diagnostics.json");
        collector.export_to_file(&path).expect("export");

        let content = fs::read_to_string(&path).expect("read report");
        let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");
        assert_eq!(json["summary"]["event_count"], 2);
        assert_eq!(json["summary"]["error_count"], 1);
    }

    #[test]
    fn clear_drops_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.log_action(UserAction::RedoAdjustment);
        collector.clear();
        assert!(collector.is_empty());
    }
}
