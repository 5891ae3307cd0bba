//! Transit-event staging buffers for an async logging backend
//!
//! This crate provides the two leaf structures that sit between a hot-path
//! log-record decoder and the slower formatter/sink stage:
//! - `TransitEventBuffer<T>` - a growable single-producer/single-consumer
//!   ring buffer of in-transit event records
//! - `FormatBufferPool` - a pool of reusable `BytesMut` scratch buffers for
//!   building formatted log messages without reallocating
//!
//! # Architecture
//!
//! ```text
//! [Decoder]                 [Staging]                  [Formatter/Sink]
//!   decode ──→ back() ──→ TransitEventBuffer ──→ front() ──→ format
//!      │          push_back()        │       pop_front()       │
//!      └── borrow_buffer() ──→ FormatBufferPool ←── return_buffer()
//! ```
//!
//! # Key Design
//!
//! - **Index masking**: capacities are powers of two, so circular indices
//!   are `pos & (capacity - 1)` - no division in the hot path
//! - **Monotonic cursors**: `reader_pos`/`writer_pos` only ever advance;
//!   occupancy is their difference
//! - **Grow on demand**: both structures double in place when full,
//!   renormalizing cursors so wraparound is transparent across a resize
//! - **Decay-based compaction**: the staging buffer tracks peak occupancy
//!   and compacts once it has been mostly idle for a full decay period
//! - **Single-threaded**: every operation takes `&mut self` - one producer
//!   role, one consumer role, no locks, no atomics
//!
//! # Example
//!
//! ```
//! use transit_buffer::{TransitEvent, TransitEventBuffer, FormatBufferPool};
//!
//! let mut staging = TransitEventBuffer::<TransitEvent>::new(4);
//! let mut pool = FormatBufferPool::new(4);
//!
//! // Producer: populate the next writable slot, then commit
//! let mut buf = pool.borrow_buffer();
//! buf.extend_from_slice(b"formatted line");
//! let slot = staging.back();
//! slot.timestamp_ns = 1;
//! slot.attach_buffer(buf);
//! staging.push_back();
//!
//! // Consumer: read the oldest committed slot, release its buffer
//! let event = staging.front().unwrap();
//! if let Some(buf) = event.take_buffer() {
//!     pool.return_buffer(buf);
//! }
//! staging.pop_front();
//! assert!(staging.is_empty());
//! ```

mod config;
mod error;
mod event;
mod format_pool;
mod transit_buffer;

pub use config::StagingConfig;
pub use error::{ConfigError, Result};
pub use event::TransitEvent;
pub use format_pool::{FormatBufferPool, FormatPoolMetrics};
pub use transit_buffer::{TransitBufferMetrics, TransitEventBuffer};

// Re-export the scratch buffer type for convenience
pub use bytes::BytesMut;

/// Scratch buffer used to build formatted log messages
pub type FormatBuffer = BytesMut;

/// Default initial capacity of the staging buffer (event slots)
pub const DEFAULT_TRANSIT_BUFFER_CAPACITY: usize = 128;

/// Default initial capacity of the format buffer pool
pub const DEFAULT_FORMAT_POOL_CAPACITY: usize = 8;

/// Returned format buffers larger than this are kept for reuse (10KB);
/// smaller ones are dropped to bound idle memory
pub const FORMAT_BUFFER_RETENTION_BYTES: usize = 10 * 1024;
