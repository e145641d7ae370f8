//! Fixed-Capacity Ring Buffer for Window Slots
//!
//! ## Overview
//!
//! The accumulator keeps its frames and their timestamps in two parallel ring
//! buffers of the same capacity. Capacity is the configured window length, so it
//! is only known at runtime; storage is allocated once at construction and never
//! resized afterwards.
//!
//! ### Behaviour
//!
//! - `push_back()` appends; once full it overwrites the logically oldest slot
//! - `get(i)` is ordered: 0 is the oldest element, `len() - 1` the newest
//! - `iter()` walks oldest to newest
//! - `len()` grows from 0 to capacity and then stays there
//!
//! ### Memory Layout
//!
//! ```text
//! RingBuffer with capacity 5 after 7 pushes (A..G):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  F  │  G  │  C  │  D  │  E  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!                ↑
//!                └── write_pos = 2 (also the oldest element once full)
//!
//! Logical view: [C, D, E, F, G]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use lapwindow_core::buffer::RingBuffer;
//!
//! let mut slots = RingBuffer::new(3).unwrap();
//! for stamp in [10u64, 20, 30, 40] {
//!     slots.push_back(stamp);
//! }
//!
//! assert_eq!(slots.len(), 3);
//! assert_eq!(slots.get(0), Ok(&20));
//! assert_eq!(slots.last(), Some(&40));
//! ```

use alloc::vec::Vec;

use crate::errors::{RangeError, WindowError, WindowResult};

/// Fixed-capacity, overwrite-oldest ring buffer
///
/// ## Internal Invariants
///
/// - `slots.len() == capacity` for the whole lifetime of the buffer
/// - `write_pos < capacity`
/// - `len <= capacity`
/// - the oldest element sits at `write_pos` once the buffer is full, and at
///   slot 0 before that
///
/// ## Thread Safety
///
/// Not synchronised. The accumulator owns its buffers exclusively.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Storage, one `Option` per slot so unfilled slots need no placeholder value
    slots: Vec<Option<T>>,

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid elements
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` elements
    ///
    /// A zero capacity is rejected: there would be no slot to write to.
    pub fn new(capacity: usize) -> WindowResult<Self> {
        if capacity == 0 {
            return Err(WindowError::InvalidConfig {
                reason: "ring buffer capacity must be positive",
            });
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            write_pos: 0,
            len: 0,
        })
    }

    /// Appends an element, evicting the oldest one when full
    pub fn push_back(&mut self, value: T) {
        let capacity = self.capacity();
        self.slots[self.write_pos] = Some(value);
        self.write_pos = (self.write_pos + 1) % capacity;

        if self.len < capacity {
            self.len += 1;
        }
    }

    /// Number of buffered elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of buffered elements
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Gets an element by its logical index (0 = oldest, len-1 = newest)
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2, full)
    /// Logical:   [A, B, C, D, E]
    ///
    /// logical[i] = physical[(write_pos + i) % capacity]
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, RangeError> {
        let out_of_range = RangeError {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }

        let physical = if self.is_full() {
            (self.write_pos + index) % self.capacity()
        } else {
            index
        };

        self.slots[physical].as_ref().ok_or(out_of_range)
    }

    /// Most recently pushed element
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let capacity = self.capacity();
        let idx = (self.write_pos + capacity - 1) % capacity;
        self.slots[idx].as_ref()
    }

    /// Iterate over elements from oldest to newest
    pub fn iter(&self) -> RingBufferIter<'_, T> {
        RingBufferIter {
            buffer: self,
            index: 0,
        }
    }
}

/// Iterator over ring buffer contents, oldest first
pub struct RingBufferIter<'a, T> {
    buffer: &'a RingBuffer<T>,
    index: usize,
}

impl<'a, T> Iterator for RingBufferIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index).ok()?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for RingBufferIter<'a, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = RingBufferIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
