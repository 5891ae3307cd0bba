//! In-transit event record
//!
//! Minimal payload type for the staging buffer: the buffer itself never
//! inspects it (any default-constructible movable type works), but tests,
//! benches and the surrounding backend use this one. Carries the capture
//! timestamp and, once the formatter has run, the scratch buffer holding
//! the formatted text.

use crate::FormatBuffer;

/// A decoded log record awaiting formatting/output
#[derive(Debug, Default)]
pub struct TransitEvent {
    /// Capture timestamp, nanoseconds since the epoch
    pub timestamp_ns: u64,

    /// Formatted message text, borrowed from the [`FormatBufferPool`]
    ///
    /// [`FormatBufferPool`]: crate::FormatBufferPool
    pub format_buffer: Option<FormatBuffer>,
}

impl TransitEvent {
    /// Attach a formatted-message buffer to this event
    #[inline]
    pub fn attach_buffer(&mut self, buffer: FormatBuffer) {
        self.format_buffer = Some(buffer);
    }

    /// Detach the formatted-message buffer, if any, for return to the pool
    #[inline]
    pub fn take_buffer(&mut self) -> Option<FormatBuffer> {
        self.format_buffer.take()
    }

    /// Formatted message as a byte slice, empty if no buffer is attached
    pub fn formatted(&self) -> &[u8] {
        self.format_buffer.as_deref().unwrap_or(&[])
    }
}
