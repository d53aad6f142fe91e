//! # tasklens-buffer
//!
//! Bounded, overwrite-oldest storage for telemetry records.
//!
//! # Architecture
//!
//! - [`ring`]: [`RingBuffer`], a fixed-capacity FIFO that evicts its oldest
//!   element on overflow. Not synchronized.
//! - [`store`]: [`SynchronizedStore`], one mutex around one ring buffer.
//!   Every operation is linearizable with respect to every other.
//! - [`statistics`]: [`BufferStatistics`], an occupancy projection.
//! - [`counters`]: lifetime append/eviction tallies kept beside the store.
//!
//! The buffer never grows past its capacity and never reports more elements
//! than it holds. Capacity changes go through [`RingBuffer::resized`], which
//! returns a new buffer keeping the most recent elements.
//!
//! # Example
//!
//! ```rust
//! use tasklens_buffer::prelude::*;
//!
//! let store = SynchronizedStore::new(3)?;
//! store.append_all(1..=4);
//!
//! let stats = store.statistics();
//! assert_eq!(stats.current_count, 3);
//! assert!(stats.is_full);
//! assert_eq!(store.to_vec(), vec![2, 3, 4]);
//! # Ok::<(), tasklens_errors::ConfigError>(())
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod counters;
pub mod prelude;
pub mod ring;
pub mod statistics;
pub mod store;

pub use counters::{CounterSnapshot, StoreCounters};
pub use ring::{Iter, RingBuffer};
pub use statistics::BufferStatistics;
pub use store::SynchronizedStore;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1000;
