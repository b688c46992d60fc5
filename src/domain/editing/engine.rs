// SPDX-License-Identifier: MPL-2.0
//! Live adjustment state with committed undo/redo history.
//!
//! Slider moves update the live set immediately so the preview can follow
//! the pointer. Only the end of a gesture (pointer or touch release) calls
//! [`AdjustmentEngine::commit`], which keeps intermediate values out of the
//! history.

use super::adjustments::AdjustmentSet;
use super::filter::{compose_filter, FilterPipeline};
use super::history::HistoryStack;
use super::newtypes::AdjustmentKind;

/// Adjustment state of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentEngine {
    live: AdjustmentSet,
    history: HistoryStack<AdjustmentSet>,
}

impl AdjustmentEngine {
    /// Creates an engine with neutral sliders and a single history entry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base(AdjustmentSet::NEUTRAL)
    }

    /// Creates an engine whose first history entry is `base`.
    #[must_use]
    pub fn with_base(base: AdjustmentSet) -> Self {
        Self {
            live: base,
            history: HistoryStack::new(base),
        }
    }

    /// Handle a slider change with live preview. Never commits.
    ///
    /// Returns the stored (clamped) value.
    pub fn set_value(&mut self, kind: AdjustmentKind, raw: f64) -> f64 {
        let value = self.live.set(kind, raw);
        log::trace!("adjustment {kind} = {value} (raw {raw})");
        value
    }

    /// Records the live set if it differs from the entry under the cursor.
    ///
    /// Call when an adjustment gesture ends. Returns true when a new entry
    /// was recorded.
    pub fn commit(&mut self) -> bool {
        let recorded = self.history.commit(&self.live);
        if recorded {
            log::debug!(
                "committed adjustments ({} of {})",
                self.history.index() + 1,
                self.history.len()
            );
        }
        recorded
    }

    /// Steps back one committed snapshot. No-op at the oldest entry.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.live = *snapshot;
                log::debug!("undo to adjustment entry {}", self.history.index());
                true
            }
            None => false,
        }
    }

    /// Steps forward one committed snapshot. No-op at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.live = *snapshot;
                log::debug!("redo to adjustment entry {}", self.history.index());
                true
            }
            None => false,
        }
    }

    /// Restores neutral sliders and collapses history to a single entry.
    ///
    /// Called whenever the base image changes.
    pub fn reset(&mut self) {
        self.reset_to(AdjustmentSet::NEUTRAL);
    }

    /// Like [`AdjustmentEngine::reset`] but with `base` as the only entry.
    pub fn reset_to(&mut self, base: AdjustmentSet) {
        self.live = base;
        self.history.reset(base);
        log::debug!("adjustment history reset");
    }

    /// The live (possibly uncommitted) set.
    #[must_use]
    pub fn current(&self) -> &AdjustmentSet {
        &self.live
    }

    /// Composed filter of the live set.
    #[must_use]
    pub fn filter(&self) -> FilterPipeline {
        compose_filter(&self.live)
    }

    /// Returns true if the live set differs from the committed entry.
    #[must_use]
    pub fn has_uncommitted_changes(&self) -> bool {
        self.live != *self.history.current()
    }

    /// Whether an undo operation is currently possible.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo operation is currently possible.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn is_at_tail(&self) -> bool {
        self.history.is_at_tail()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    /// Committed snapshots, oldest first.
    #[must_use]
    pub fn history(&self) -> &[AdjustmentSet] {
        self.history.entries()
    }
}

impl Default for AdjustmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_value(engine: &mut AdjustmentEngine, kind: AdjustmentKind, value: f64) {
        engine.set_value(kind, value);
        assert!(engine.commit());
    }

    #[test]
    fn starts_neutral_at_tail() {
        let engine = AdjustmentEngine::new();
        assert!(engine.current().is_neutral());
        assert_eq!(engine.history_len(), 1);
        assert!(engine.is_at_tail());
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
    }

    #[test]
    fn set_value_clamps_without_committing() {
        let mut engine = AdjustmentEngine::new();
        assert_eq!(engine.set_value(AdjustmentKind::Contrast, 250.0), 200.0);
        assert_eq!(engine.current().contrast(), 200.0);
        assert_eq!(engine.history_len(), 1);
        assert!(engine.has_uncommitted_changes());
        assert!(engine.filter().to_css().contains("contrast(200%)"));
    }

    #[test]
    fn commit_is_idempotent() {
        let mut engine = AdjustmentEngine::new();
        engine.set_value(AdjustmentKind::Sepia, 20.0);
        assert!(engine.commit());
        assert!(!engine.commit());
        assert_eq!(engine.history_len(), 2);
        assert!(!engine.has_uncommitted_changes());
    }

    #[test]
    fn commit_without_changes_is_noop() {
        let mut engine = AdjustmentEngine::new();
        engine.set_value(AdjustmentKind::Blur, 4.0);
        engine.set_value(AdjustmentKind::Blur, 0.0);
        assert!(!engine.commit());
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn undo_then_redo_restores_state() {
        let mut engine = AdjustmentEngine::new();
        commit_value(&mut engine, AdjustmentKind::Exposure, 10.0);
        commit_value(&mut engine, AdjustmentKind::Grayscale, 60.0);
        let before = *engine.current();

        assert!(engine.undo());
        assert_eq!(engine.current().grayscale(), 0.0);
        assert!(engine.can_redo());
        assert!(engine.redo());
        assert_eq!(*engine.current(), before);
    }

    #[test]
    fn undo_and_redo_stop_at_the_ends() {
        let mut engine = AdjustmentEngine::new();
        assert!(!engine.undo());
        assert!(!engine.redo());

        commit_value(&mut engine, AdjustmentKind::Invert, 100.0);
        assert!(engine.undo());
        assert!(!engine.undo());
        assert_eq!(engine.history_index(), 0);
        assert!(engine.current().is_neutral());
    }

    #[test]
    fn new_commit_after_undo_discards_redo_branch() {
        let mut engine = AdjustmentEngine::new();
        commit_value(&mut engine, AdjustmentKind::Exposure, 10.0); // C2
        commit_value(&mut engine, AdjustmentKind::Exposure, 20.0); // C3

        assert!(engine.undo());
        assert_eq!(engine.current().exposure(), 10.0);

        commit_value(&mut engine, AdjustmentKind::Shadows, -40.0); // C4

        let exposures: Vec<_> = engine.history().iter().map(AdjustmentSet::exposure).collect();
        assert_eq!(exposures, [0.0, 10.0, 10.0]);
        assert_eq!(engine.history()[2].shadows(), -40.0);
        assert!(!engine.redo());
        assert!(engine.is_at_tail());
    }

    #[test]
    fn reset_discards_history_and_live_changes() {
        let mut engine = AdjustmentEngine::new();
        commit_value(&mut engine, AdjustmentKind::Saturation, 150.0);
        engine.set_value(AdjustmentKind::Blur, 3.0);

        engine.reset();

        assert!(engine.current().is_neutral());
        assert_eq!(engine.history_len(), 1);
        assert_eq!(engine.history_index(), 0);
        assert!(!engine.can_undo());
    }

    #[test]
    fn reset_to_uses_given_base() {
        let base = AdjustmentSet::default().with(AdjustmentKind::Sepia, 30.0);
        let mut engine = AdjustmentEngine::new();
        commit_value(&mut engine, AdjustmentKind::Exposure, 5.0);

        engine.reset_to(base);

        assert_eq!(*engine.current(), base);
        assert_eq!(engine.history(), &[base]);
    }

    #[test]
    fn undo_discards_uncommitted_changes() {
        let mut engine = AdjustmentEngine::new();
        commit_value(&mut engine, AdjustmentKind::Contrast, 120.0);
        engine.set_value(AdjustmentKind::Contrast, 180.0);

        assert!(engine.undo());
        assert_eq!(engine.current().contrast(), 100.0);
        assert!(engine.redo());
        assert_eq!(engine.current().contrast(), 120.0);
    }
}
