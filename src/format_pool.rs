//! Pool of reusable format buffers
//!
//! The formatter borrows a scratch `BytesMut` to build a formatted message,
//! attaches it to the in-transit event, and whoever drains the event returns
//! the buffer. Pooling avoids reallocating the large buffers that formatted
//! output tends to need; small buffers are cheap to recreate, so they are
//! dropped on return instead of retained.
//!
//! Same masked-index discipline as the staging buffer, but expand-only: the
//! pool never shrinks. Occupancy counts outstanding borrows - borrowing
//! advances the write cursor, returning advances the read cursor.

use crate::{FormatBuffer, FORMAT_BUFFER_RETENTION_BYTES};

/// Counters for pool traffic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatPoolMetrics {
    /// Borrows satisfied by a retained buffer
    pub hits: u64,

    /// Borrows that allocated a fresh buffer
    pub misses: u64,

    /// Returned buffers kept for reuse (above the retention threshold)
    pub retained: u64,

    /// Returned buffers dropped (at or below the retention threshold)
    pub discarded: u64,
}

/// Expand-only circular pool of reusable format buffers
///
/// Every stored slot is either empty (no buffer allocated yet, or the last
/// returned buffer was below the retention threshold) or owns a `BytesMut`.
/// Exactly one of {pool slot, active borrower} owns a given buffer at any
/// time.
#[derive(Debug)]
pub struct FormatBufferPool {
    /// Current slot count, always a power of two
    capacity: usize,

    /// Optional buffer per slot; `None` until a large buffer lands there
    storage: Box<[Option<FormatBuffer>]>,

    /// `capacity - 1`, for masked index computation
    mask: usize,

    /// Monotonic cursor advanced by `return_buffer`
    reader_pos: usize,

    /// Monotonic cursor advanced by `borrow_buffer`
    writer_pos: usize,

    metrics: FormatPoolMetrics,
}

impl FormatBufferPool {
    /// Create a pool with at least `initial_capacity` slots
    ///
    /// The requested capacity is rounded up to the next power of two. No
    /// buffers are allocated up front; slots fill in as large buffers are
    /// returned.
    pub fn new(initial_capacity: usize) -> Self {
        let capacity = initial_capacity.next_power_of_two();
        let mut storage = Vec::with_capacity(capacity);
        storage.resize_with(capacity, || None);
        Self {
            capacity,
            storage: storage.into_boxed_slice(),
            mask: capacity - 1,
            reader_pos: 0,
            writer_pos: 0,
            metrics: FormatPoolMetrics::default(),
        }
    }

    /// Take ownership of a scratch buffer from the pool
    ///
    /// Expands the pool first if every slot is on loan. Returns the slot's
    /// retained buffer when it has one, otherwise a fresh empty buffer.
    /// The caller owns the result until it calls
    /// [`return_buffer`](Self::return_buffer).
    #[inline]
    pub fn borrow_buffer(&mut self) -> FormatBuffer {
        if self.len() == self.capacity {
            self.expand();
        }
        let slot = &mut self.storage[self.writer_pos & self.mask];
        self.writer_pos += 1;
        match slot.take() {
            Some(buffer) => {
                self.metrics.hits += 1;
                buffer
            }
            None => {
                self.metrics.misses += 1;
                FormatBuffer::new()
            }
        }
    }

    /// Give a borrowed buffer back to the pool
    ///
    /// Buffers above the retention threshold are stored for reuse,
    /// unchanged; smaller ones are dropped so idle memory stays bounded.
    /// The pool's occupancy advances either way. Returning more buffers
    /// than were borrowed is a contract violation.
    #[inline]
    pub fn return_buffer(&mut self, buffer: FormatBuffer) {
        debug_assert!(
            self.reader_pos != self.writer_pos,
            "return_buffer without matching borrow"
        );
        if buffer.len() > FORMAT_BUFFER_RETENTION_BYTES {
            self.storage[self.reader_pos & self.mask] = Some(buffer);
            self.metrics.retained += 1;
        } else {
            self.metrics.discarded += 1;
        }
        self.reader_pos += 1;
    }

    /// Number of buffers currently on loan
    #[inline]
    pub fn len(&self) -> usize {
        self.writer_pos - self.reader_pos
    }

    /// Current slot capacity (always a power of two)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether no buffers are currently on loan
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reader_pos == self.writer_pos
    }

    /// Snapshot of the traffic counters
    pub fn metrics(&self) -> FormatPoolMetrics {
        self.metrics
    }

    /// Double the capacity, preserving slot order from the read cursor
    fn expand(&mut self) {
        let new_capacity = self.capacity * 2;
        tracing::debug!(
            old_capacity = self.capacity,
            new_capacity,
            "expanding format buffer pool"
        );

        let current_size = self.len();
        let mut new_storage = Vec::with_capacity(new_capacity);
        for i in 0..current_size {
            new_storage.push(self.storage[(self.reader_pos + i) & self.mask].take());
        }
        new_storage.resize_with(new_capacity, || None);

        self.storage = new_storage.into_boxed_slice();
        self.capacity = new_capacity;
        self.mask = new_capacity - 1;
        self.reader_pos = 0;
        self.writer_pos = current_size;
    }
}

#[cfg(test)]
#[path = "format_pool_test.rs"]
mod format_pool_test;
