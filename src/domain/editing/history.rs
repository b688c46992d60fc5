// SPDX-License-Identifier: MPL-2.0
//! Linear undo/redo history.

/// An ordered list of snapshots with a cursor.
///
/// The stack is never empty and the cursor always points at an entry.
/// Recording a snapshot while the cursor sits before the tail discards the
/// entries after it, so the redo branch is lost for good.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStack<T> {
    entries: Vec<T>,
    index: usize,
}

impl<T: Clone> HistoryStack<T> {
    /// Creates a history holding a single entry.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Returns the entry under the cursor.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    /// Position of the cursor.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of recorded entries (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Whether an undo operation is currently possible.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether a redo operation is currently possible.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Returns true when the cursor sits on the newest entry.
    #[must_use]
    pub fn is_at_tail(&self) -> bool {
        !self.can_redo()
    }

    /// Appends `entry` after the cursor, dropping any redo branch.
    pub fn push(&mut self, entry: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push(entry);
        self.index = self.entries.len() - 1;
    }

    /// Moves the cursor one step back and returns the entry there.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Moves the cursor one step forward and returns the entry there.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Moves the cursor to `index` without discarding anything.
    pub fn jump_to(&mut self, index: usize) -> Option<&T> {
        if index >= self.entries.len() {
            return None;
        }
        self.index = index;
        Some(self.current())
    }

    /// Replaces the whole history with a single entry.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.index = 0;
    }
}

impl<T: Clone + PartialEq> HistoryStack<T> {
    /// Records `snapshot` unless it equals the entry under the cursor.
    ///
    /// Returns true when a new entry was appended.
    pub fn commit(&mut self, snapshot: &T) -> bool {
        if self.current() == snapshot {
            return false;
        }
        self.push(snapshot.clone());
        true
    }
}
