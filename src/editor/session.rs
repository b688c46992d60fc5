// SPDX-License-Identifier: MPL-2.0
//! Image-level edit history around an [`AdjustmentEngine`].
//!
//! Every entry pairs the adjustments in effect with the revision of the base
//! image they apply to. An external edit (AI prompt, extend) produces a new
//! base image, bumps the revision and resets the sliders.

use std::fmt;

use crate::diagnostics::{DiagnosticsCollector, UserAction};
use crate::domain::editing::{
    AdjustmentEngine, AdjustmentKind, AdjustmentSet, FilterPipeline, FilterPreset, HistoryStack,
};

/// What produced an edit history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// The image as opened.
    Initial,
    /// A named look was baked into the image.
    Preset(String),
    /// An AI prompt edit.
    Prompt,
    /// The canvas was extended.
    Extended,
    /// Slider adjustments.
    Adjustments,
}

impl EditKind {
    /// Label shown in the history list.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            EditKind::Initial => "Initial State".to_string(),
            EditKind::Preset(name) => format!("Preset: {name}"),
            EditKind::Prompt => "AI Prompt".to_string(),
            EditKind::Extended => "Image Extended".to_string(),
            EditKind::Adjustments => "Adjustments".to_string(),
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One entry of the edit history.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    pub kind: EditKind,
    pub adjustments: AdjustmentSet,
    /// Revision of the base image this entry applies to.
    pub revision: u64,
}

/// Editing session of a single image.
#[derive(Debug, Clone)]
pub struct EditSession {
    entries: HistoryStack<SessionEntry>,
    engine: AdjustmentEngine,
    diagnostics: Option<DiagnosticsCollector>,
}

impl EditSession {
    /// Opens a session with one `Initial` entry at revision 0.
    #[must_use]
    pub fn open() -> Self {
        Self {
            entries: HistoryStack::new(SessionEntry {
                kind: EditKind::Initial,
                adjustments: AdjustmentSet::NEUTRAL,
                revision: 0,
            }),
            engine: AdjustmentEngine::new(),
            diagnostics: None,
        }
    }

    /// Attaches a diagnostics collector that receives user actions.
    #[must_use]
    pub fn with_diagnostics(mut self, mut collector: DiagnosticsCollector) -> Self {
        collector.log_action(UserAction::LoadImage);
        self.diagnostics = Some(collector);
        self
    }

    // =========================================================================
    // Adjustments
    // =========================================================================

    /// Moves a slider. The value is previewed but not committed.
    pub fn set_value(&mut self, kind: AdjustmentKind, raw: f64) -> f64 {
        self.engine.set_value(kind, raw)
    }

    /// Sets a slider outside of a gesture and commits it immediately.
    pub fn apply_value(&mut self, kind: AdjustmentKind, raw: f64) -> f64 {
        let value = self.engine.set_value(kind, raw);
        self.record(UserAction::SetAdjustment {
            adjustment: kind.name().to_string(),
            value,
        });
        self.end_gesture();
        value
    }

    /// Ends a slider gesture. Returns true when a new snapshot was committed.
    pub fn end_gesture(&mut self) -> bool {
        let committed = self.engine.commit();
        if committed {
            self.record(UserAction::CommitAdjustments);
        }
        committed
    }

    pub fn undo(&mut self) -> bool {
        let done = self.engine.undo();
        if done {
            self.record(UserAction::UndoAdjustment);
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.engine.redo();
        if done {
            self.record(UserAction::RedoAdjustment);
        }
        done
    }

    /// Returns every slider to its default and clears the adjustment history.
    pub fn reset_adjustments(&mut self) {
        self.engine.reset();
        self.record(UserAction::ResetAdjustments);
    }

    // =========================================================================
    // Edit History
    // =========================================================================

    /// Records a new base image produced by an external edit.
    ///
    /// Entries after the current one are discarded, the revision is bumped
    /// and the sliders are reset. Returns the new revision.
    pub fn replace_base(&mut self, kind: EditKind) -> u64 {
        let revision = self.revision() + 1;
        let label = kind.label();
        self.entries.push(SessionEntry {
            kind,
            adjustments: AdjustmentSet::NEUTRAL,
            revision,
        });
        self.engine.reset();
        log::debug!("base image replaced ({label}), revision {revision}");
        self.record(UserAction::ReplaceBase { label });
        revision
    }

    /// Bakes a look into the image as a new base revision.
    ///
    /// The look comes from the filter gallery, so the entry's
    /// `Preset: <name>` label names a gallery look.
    pub fn apply_preset(&mut self, preset: &FilterPreset) -> u64 {
        self.record(UserAction::ApplyPreset {
            name: preset.name().to_string(),
        });
        self.replace_base(EditKind::Preset(preset.name().to_string()))
    }

    /// Records the live adjustments as an entry when they differ from the
    /// current one. Returns whether an entry was added.
    pub fn snapshot_adjustments(&mut self) -> bool {
        let current = self.current_entry();
        if *self.engine.current() == current.adjustments {
            return false;
        }
        let entry = SessionEntry {
            kind: EditKind::Adjustments,
            adjustments: *self.engine.current(),
            revision: current.revision,
        };
        self.entries.push(entry);
        self.record(UserAction::SnapshotAdjustments);
        true
    }

    /// Moves to entry `index` and restores its adjustments as the only
    /// adjustment history entry. Out of range is a no-op.
    pub fn revert_to(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.jump_to(index) else {
            return false;
        };
        let adjustments = entry.adjustments;
        self.engine.reset_to(adjustments);
        log::debug!("reverted to edit entry {index}");
        self.record(UserAction::RevertHistory { index });
        true
    }

    /// Goes back to the first entry.
    pub fn start_over(&mut self) -> bool {
        self.revert_to(0)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn entries(&self) -> &[SessionEntry] {
        self.entries.entries()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.entries.index()
    }

    #[must_use]
    pub fn current_entry(&self) -> &SessionEntry {
        self.entries.current()
    }

    /// Revision of the base image under the cursor.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.current_entry().revision
    }

    #[must_use]
    pub fn engine(&self) -> &AdjustmentEngine {
        &self.engine
    }

    /// Direct engine access. Changes made here are not logged.
    pub fn engine_mut(&mut self) -> &mut AdjustmentEngine {
        &mut self.engine
    }

    /// Filter of the live adjustments.
    #[must_use]
    pub fn filter(&self) -> FilterPipeline {
        self.engine.filter()
    }

    #[must_use]
    pub fn diagnostics(&self) -> Option<&DiagnosticsCollector> {
        self.diagnostics.as_ref()
    }

    pub fn diagnostics_mut(&mut self) -> Option<&mut DiagnosticsCollector> {
        self.diagnostics.as_mut()
    }

    fn record(&mut self, action: UserAction) {
        if let Some(collector) = self.diagnostics.as_mut() {
            collector.log_action(action);
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticEventKind;

    #[test]
    fn open_has_single_initial_entry() {
        let session = EditSession::open();
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.current_entry().kind, EditKind::Initial);
        assert_eq!(session.revision(), 0);
        assert!(session.engine().current().is_neutral());
    }

    #[test]
    fn labels_match_history_list() {
        assert_eq!(EditKind::Initial.label(), "Initial State");
        assert_eq!(EditKind::Preset("Noir".into()).label(), "Preset: Noir");
        assert_eq!(EditKind::Prompt.label(), "AI Prompt");
        assert_eq!(EditKind::Extended.label(), "Image Extended");
        assert_eq!(EditKind::Adjustments.to_string(), "Adjustments");
    }

    #[test]
    fn replace_base_bumps_revision_and_resets_engine() {
        let mut session = EditSession::open();
        session.set_value(AdjustmentKind::Sepia, 40.0);
        session.end_gesture();
        assert_eq!(session.engine().history_len(), 2);

        assert_eq!(session.replace_base(EditKind::Prompt), 1);
        assert_eq!(session.entries().len(), 2);
        assert_eq!(session.current_index(), 1);
        assert!(session.engine().current().is_neutral());
        assert_eq!(session.engine().history_len(), 1);
    }

    #[test]
    fn replace_base_after_revert_truncates_entries() {
        let mut session = EditSession::open();
        session.replace_base(EditKind::Prompt);
        session.replace_base(EditKind::Extended);
        assert!(session.revert_to(0));

        let revision = session.replace_base(EditKind::Prompt);
        assert_eq!(revision, 1);
        assert_eq!(session.entries().len(), 2);
    }

    #[test]
    fn snapshot_only_when_adjustments_changed() {
        let mut session = EditSession::open();
        assert!(!session.snapshot_adjustments());

        session.set_value(AdjustmentKind::Contrast, 130.0);
        assert!(session.snapshot_adjustments());
        assert!(!session.snapshot_adjustments());

        let entry = session.current_entry();
        assert_eq!(entry.kind, EditKind::Adjustments);
        assert_eq!(entry.revision, 0);
        assert_eq!(entry.adjustments.contrast(), 130.0);
    }

    #[test]
    fn revert_restores_entry_adjustments_as_single_history() {
        let mut session = EditSession::open();
        session.set_value(AdjustmentKind::Grayscale, 60.0);
        session.end_gesture();
        session.snapshot_adjustments();
        session.set_value(AdjustmentKind::Grayscale, 90.0);
        session.end_gesture();

        assert!(session.revert_to(1));
        assert_eq!(session.engine().current().grayscale(), 60.0);
        assert_eq!(session.engine().history_len(), 1);
        assert!(!session.engine().can_undo());

        assert!(session.start_over());
        assert!(session.engine().current().is_neutral());
    }

    #[test]
    fn revert_out_of_range_is_noop() {
        let mut session = EditSession::open();
        session.set_value(AdjustmentKind::Blur, 2.0);
        assert!(!session.revert_to(5));
        assert_eq!(session.engine().current().blur(), 2.0);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn apply_preset_adds_labelled_entry() {
        let mut session = EditSession::open();
        let noir = FilterPreset::find("noir").expect("built-in look");
        assert_eq!(session.apply_preset(&noir), 1);
        assert_eq!(session.current_entry().kind.label(), "Preset: Noir");
    }

    #[test]
    fn actions_are_recorded_when_diagnostics_attached() {
        let mut session = EditSession::open().with_diagnostics(DiagnosticsCollector::default());
        session.apply_value(AdjustmentKind::Exposure, 10.0);
        session.undo();
        session.redo();
        session.reset_adjustments();

        let actions: Vec<UserAction> = session
            .diagnostics()
            .expect("collector attached")
            .events()
            .filter_map(|event| match &event.kind {
                DiagnosticEventKind::UserAction { action, .. } => Some(action.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(actions[0], UserAction::LoadImage);
        assert!(actions.contains(&UserAction::CommitAdjustments));
        assert!(actions.contains(&UserAction::UndoAdjustment));
        assert!(actions.contains(&UserAction::RedoAdjustment));
        assert_eq!(actions.last(), Some(&UserAction::ResetAdjustments));
    }
}
