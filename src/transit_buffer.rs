//! Growable SPSC staging ring buffer
//!
//! Holds fully-decoded event records in transit between the decoder and the
//! formatter/sink stage. Capacity is always a power of two so circular
//! indices reduce to a bitwise AND, and the cursors are monotonic - they
//! are only renormalized when storage is reallocated.
//!
//! # Capacity lifecycle
//!
//! - `back()` doubles the capacity when the buffer is full
//! - `update_size()` compacts an expanded buffer once observed occupancy has
//!   stayed at or below half the capacity for a full decay period
//! - `request_shrink()` + `try_shrink()` return an idle buffer to its
//!   initial capacity

use std::mem;
use std::time::{Duration, Instant};

/// Counters for staging buffer resizes
///
/// Plain `u64` counters - the buffer is `&mut self` single-threaded, so
/// there is nothing to synchronize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitBufferMetrics {
    /// Capacity doublings triggered by a full buffer
    pub expansions: u64,

    /// Decay-driven compactions to the observed peak occupancy
    pub compactions: u64,

    /// Successful `try_shrink` reallocations back to the initial capacity
    pub shrinks: u64,
}

/// Growable single-producer/single-consumer ring buffer of event records
///
/// The payload type stays opaque: it only needs to be default-constructible
/// (empty slots) and movable (resize relocation). The producer obtains the
/// next writable slot with [`back`](Self::back), populates it in place and
/// commits with [`push_back`](Self::push_back); the consumer reads the
/// oldest committed slot with [`front`](Self::front) and releases it with
/// [`pop_front`](Self::pop_front).
#[derive(Debug)]
pub struct TransitEventBuffer<T> {
    /// Capacity the buffer starts at and shrinks back to
    initial_capacity: usize,

    /// Current slot count, always a power of two >= `initial_capacity`
    capacity: usize,

    /// Slot storage; the live region is `[reader_pos, writer_pos)` masked
    storage: Box<[T]>,

    /// `capacity - 1`, for masked index computation
    mask: usize,

    /// Monotonic read cursor; never reset except on resize
    reader_pos: usize,

    /// Monotonic write cursor; never reset except on resize
    writer_pos: usize,

    /// Peak occupancy observed since the decay timer was armed
    max_size: usize,

    /// When the current decay window started; `None` means disarmed
    last_capacity_check: Option<Instant>,

    /// Sticky flag set by `request_shrink`, consumed by `try_shrink`
    shrink_requested: bool,

    metrics: TransitBufferMetrics,
}

impl<T: Default> TransitEventBuffer<T> {
    /// Create a buffer with at least `initial_capacity` slots
    ///
    /// The requested capacity is rounded up to the next power of two.
    pub fn new(initial_capacity: usize) -> Self {
        let capacity = initial_capacity.next_power_of_two();
        Self {
            initial_capacity: capacity,
            capacity,
            storage: Self::allocate(capacity),
            mask: capacity - 1,
            reader_pos: 0,
            writer_pos: 0,
            max_size: 0,
            last_capacity_check: None,
            shrink_requested: false,
            metrics: TransitBufferMetrics::default(),
        }
    }

    /// Get the oldest committed slot, or `None` if the buffer is empty
    ///
    /// No side effects; call [`pop_front`](Self::pop_front) once the slot
    /// has been fully processed.
    #[inline]
    pub fn front(&mut self) -> Option<&mut T> {
        if self.reader_pos == self.writer_pos {
            return None;
        }
        Some(&mut self.storage[self.reader_pos & self.mask])
    }

    /// Discard the slot the consumer just finished reading
    ///
    /// Calling this on an empty buffer is a contract violation; the caller
    /// must check [`front`](Self::front) or [`is_empty`](Self::is_empty)
    /// first.
    #[inline]
    pub fn pop_front(&mut self) {
        debug_assert!(
            self.reader_pos != self.writer_pos,
            "pop_front on empty buffer"
        );
        self.reader_pos += 1;
    }

    /// Get the next writable slot, expanding first if the buffer is full
    ///
    /// Must be followed by [`push_back`](Self::push_back) to commit the
    /// slot; until then the consumer cannot observe it.
    #[inline]
    pub fn back(&mut self) -> &mut T {
        if self.len() == self.capacity {
            self.expand();
        }
        &mut self.storage[self.writer_pos & self.mask]
    }

    /// Publish the slot most recently obtained via [`back`](Self::back)
    #[inline]
    pub fn push_back(&mut self) {
        debug_assert!(self.len() < self.capacity, "push_back without back");
        self.writer_pos += 1;
    }

    /// Number of committed, unread slots
    #[inline]
    pub fn len(&self) -> usize {
        self.writer_pos - self.reader_pos
    }

    /// Current slot capacity (always a power of two)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether there are no committed, unread slots
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reader_pos == self.writer_pos
    }

    /// Decay-based compaction policy; invoke once per consumer loop
    ///
    /// Tracks the peak occupancy of an expanded buffer and, once it has
    /// stayed at or below half the current capacity for a full
    /// `decay_period`, compacts storage down to the next power of two above
    /// that peak (never below the initial capacity). A `decay_period` of
    /// zero disables compaction entirely.
    pub fn update_size(&mut self, now: Instant, decay_period: Duration) {
        if decay_period.is_zero() {
            return;
        }

        if self.capacity == self.initial_capacity {
            // Nothing to compact
            return;
        }

        let current_size = self.len();
        let previous_capacity = self.capacity >> 1;

        if current_size > previous_capacity {
            // Still genuinely using the expanded capacity; start over
            self.max_size = 0;
            self.last_capacity_check = None;
            return;
        }

        self.max_size = self.max_size.max(current_size);

        let armed_at = match self.last_capacity_check {
            Some(armed_at) => armed_at,
            None => {
                self.last_capacity_check = Some(now);
                return;
            }
        };

        if now.duration_since(armed_at) <= decay_period {
            // Still waiting out the decay window
            return;
        }

        // Under-utilized for a full decay period: compact to the observed
        // peak, keeping the power-of-two and >= initial_capacity invariants.
        let new_capacity = self
            .max_size
            .max(1)
            .next_power_of_two()
            .max(self.initial_capacity);

        if new_capacity < self.capacity {
            tracing::debug!(
                old_capacity = self.capacity,
                new_capacity,
                max_size = self.max_size,
                "compacting staging buffer"
            );
            self.resize(new_capacity);
            self.metrics.compactions += 1;
        }

        self.last_capacity_check = None;
        self.max_size = 0;
    }

    /// Request that the buffer return to its initial capacity
    ///
    /// Sticky and idempotent; the shrink happens on a later
    /// [`try_shrink`](Self::try_shrink) call once the buffer is empty.
    pub fn request_shrink(&mut self) {
        self.shrink_requested = true;
    }

    /// Shrink back to the initial capacity if requested and empty
    ///
    /// A no-op while the buffer holds committed slots; the request stays
    /// pending until a call finds the buffer empty.
    pub fn try_shrink(&mut self) {
        // Only empty buffers shrink
        if self.shrink_requested && self.is_empty() {
            if self.capacity > self.initial_capacity {
                tracing::debug!(
                    old_capacity = self.capacity,
                    new_capacity = self.initial_capacity,
                    "shrinking staging buffer to initial capacity"
                );
                self.storage = Self::allocate(self.initial_capacity);
                self.capacity = self.initial_capacity;
                self.mask = self.capacity - 1;
                self.reader_pos = 0;
                self.writer_pos = 0;
                self.metrics.shrinks += 1;
            }

            self.shrink_requested = false;
        }
    }

    /// Snapshot of the resize counters
    pub fn metrics(&self) -> TransitBufferMetrics {
        self.metrics
    }

    /// Double the capacity; called by `back()` when the buffer is full
    fn expand(&mut self) {
        let new_capacity = self.capacity * 2;
        tracing::debug!(
            old_capacity = self.capacity,
            new_capacity,
            "expanding staging buffer"
        );
        self.resize(new_capacity);
        self.metrics.expansions += 1;
    }

    /// Reallocate storage at `new_capacity`, moving the live elements into
    /// contiguous positions `0..len` in logical order
    ///
    /// The masked reader position handles wraparound in the old storage;
    /// afterwards the cursors are renormalized so indexing starts over at
    /// zero with the new mask.
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity.is_power_of_two());
        debug_assert!(new_capacity >= self.len());

        let current_size = self.len();
        let mut new_storage = Vec::with_capacity(new_capacity);
        for i in 0..current_size {
            let slot = &mut self.storage[(self.reader_pos + i) & self.mask];
            new_storage.push(mem::take(slot));
        }
        new_storage.resize_with(new_capacity, T::default);

        self.storage = new_storage.into_boxed_slice();
        self.capacity = new_capacity;
        self.mask = new_capacity - 1;
        self.reader_pos = 0;
        self.writer_pos = current_size;
        self.last_capacity_check = None;
    }

    fn allocate(capacity: usize) -> Box<[T]> {
        let mut storage = Vec::with_capacity(capacity);
        storage.resize_with(capacity, T::default);
        storage.into_boxed_slice()
    }
}

#[cfg(test)]
#[path = "transit_buffer_test.rs"]
mod transit_buffer_test;
