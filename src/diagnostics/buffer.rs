// SPDX-License-Identifier: MPL-2.0
//! Fixed-capacity ring buffer for diagnostic events.

use std::collections::VecDeque;

// =============================================================================
// Buffer Capacity Bounds
// =============================================================================

/// Buffer capacity bounds (100 to 10000 events).
pub mod buffer_capacity_bounds {
    /// Minimum buffer capacity.
    pub const MIN: usize = 100;
    /// Maximum buffer capacity.
    pub const MAX: usize = 10000;
    /// Default buffer capacity.
    pub const DEFAULT: usize = 1000;
}

/// Number of events the diagnostics buffer keeps, clamped to 100–10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// CircularBuffer
// =============================================================================

/// Ring buffer that evicts its oldest element once full.
///
/// # Example
///
/// ```
/// use lens_adjust::diagnostics::CircularBuffer;
///
/// let mut buffer = CircularBuffer::with_raw_capacity(2);
/// buffer.push(1);
/// buffer.push(2);
/// buffer.push(3);
///
/// let items: Vec<_> = buffer.iter().copied().collect();
/// assert_eq!(items, vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a buffer with an unchecked capacity (at least 1).
    ///
    /// Meant for tests that need tiny buffers.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    /// Elements oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_clamps_to_bounds() {
        assert_eq!(BufferCapacity::new(1).value(), buffer_capacity_bounds::MIN);
        assert_eq!(BufferCapacity::new(50_000).value(), buffer_capacity_bounds::MAX);
        assert_eq!(BufferCapacity::new(500).value(), 500);
        assert_eq!(BufferCapacity::default().value(), buffer_capacity_bounds::DEFAULT);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut buffer = CircularBuffer::with_raw_capacity(3);
        for i in 0..5 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn zero_raw_capacity_keeps_one_element() {
        let mut buffer = CircularBuffer::with_raw_capacity(0);
        buffer.push("a");
        buffer.push("b");
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = CircularBuffer::new(BufferCapacity::default());
        buffer.push(1);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
