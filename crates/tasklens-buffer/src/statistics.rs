//! Occupancy statistics for a ring buffer.
//!
//! [`BufferStatistics`] is a pure projection of buffer state. It is built on
//! demand from the live buffer and never cached.

use serde::{Deserialize, Serialize};

/// Point-in-time occupancy of a [`RingBuffer`](crate::RingBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferStatistics {
    /// Maximum number of elements.
    pub capacity: usize,
    /// Elements currently held.
    pub current_count: usize,
    /// `capacity - current_count`.
    pub available_space: usize,
    /// `100 * current_count / capacity`, in `0.0..=100.0`.
    pub utilization_percentage: f64,
    /// No elements held.
    pub is_empty: bool,
    /// Next append evicts.
    pub is_full: bool,
}

impl BufferStatistics {
    /// Derive statistics from a capacity and a count.
    ///
    /// `current_count` is clamped to `capacity`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(capacity: usize, current_count: usize) -> Self {
        let current_count = current_count.min(capacity);
        let utilization_percentage = if capacity == 0 {
            0.0
        } else {
            (current_count as f64 / capacity as f64) * 100.0
        };

        Self {
            capacity,
            current_count,
            available_space: capacity.saturating_sub(current_count),
            utilization_percentage,
            is_empty: current_count == 0,
            is_full: current_count == capacity,
        }
    }
}
