//! Prelude for tasklens-buffer.
//!
//! ```rust
//! use tasklens_buffer::prelude::*;
//!
//! let mut buffer = RingBuffer::new(DEFAULT_CAPACITY)?;
//! buffer.append(1_u32);
//! assert_eq!(buffer.statistics().current_count, 1);
//! # Ok::<(), tasklens_errors::ConfigError>(())
//! ```

pub use crate::DEFAULT_CAPACITY;
pub use crate::counters::{CounterSnapshot, StoreCounters};
pub use crate::ring::RingBuffer;
pub use crate::statistics::BufferStatistics;
pub use crate::store::SynchronizedStore;
