// SPDX-License-Identifier: MPL-2.0
//! Serializable diagnostic report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DiagnosticEvent, DiagnosticEventKind};
use crate::error::Result;

/// Aggregate counts over the reported events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub event_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
    /// Number of occurrences per user action tag.
    pub actions: BTreeMap<String, usize>,
}

/// A diagnostics report as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub app_version: String,
    pub generated_at: DateTime<Utc>,
    pub collection_started_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub events: Vec<DiagnosticEvent>,
}

impl DiagnosticReport {
    /// Builds a report, computing the summary from `events`.
    #[must_use]
    pub fn from_events(collection_started_at: DateTime<Utc>, events: Vec<DiagnosticEvent>) -> Self {
        let mut summary = ReportSummary {
            event_count: events.len(),
            ..ReportSummary::default()
        };
        for event in &events {
            match &event.kind {
                DiagnosticEventKind::UserAction { action, .. } => {
                    *summary.actions.entry(action_tag(action)).or_insert(0) += 1;
                }
                DiagnosticEventKind::Warning { .. } => summary.warning_count += 1,
                DiagnosticEventKind::Error { .. } => summary.error_count += 1,
            }
        }

        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            collection_started_at,
            summary,
            events,
        }
    }

    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The serde tag of an action (`commit_adjustments`, `apply_preset`, ...).
fn action_tag(action: &super::UserAction) -> String {
    serde_json::to_value(action)
        .ok()
        .and_then(|value| value.get("action").and_then(|tag| tag.as_str()).map(str::to_owned))
        .unwrap_or_else(|| "unknown".to_string())
}
