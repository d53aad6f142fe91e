//! Concurrency-safe façade over a [`RingBuffer`].
//!
//! [`SynchronizedStore`] guards a single ring buffer with one
//! `parking_lot::Mutex`. Every operation, mutating or inspecting, serializes
//! through that lock, so no caller can observe a half-applied append (count
//! bumped but element missing, or the reverse).
//!
//! # Lock discipline
//!
//! - Operations hold the lock only for bounded, capacity-sized work.
//! - [`SynchronizedStore::filter`] copies under the lock and evaluates the
//!   predicate after releasing it.
//! - [`SynchronizedStore::perform_batch_read`] runs the caller's transform
//!   under the lock; keep it short.
//!
//! The store owns no threads and never blocks beyond lock acquisition. Share
//! it across threads with `Arc`.

use parking_lot::Mutex;
use tasklens_errors::ConfigError;
use tracing::debug;

use crate::counters::{CounterSnapshot, StoreCounters};
use crate::ring::RingBuffer;
use crate::statistics::BufferStatistics;

/// Thread-safe bounded FIFO store.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tasklens_buffer::SynchronizedStore;
///
/// let store = Arc::new(SynchronizedStore::new(2)?);
/// store.append(1);
/// store.append(2);
/// assert_eq!(store.append(3), Some(1));
///
/// let evens = store.filter(|n| n % 2 == 0);
/// assert_eq!(evens, vec![2]);
/// # Ok::<(), tasklens_errors::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct SynchronizedStore<T> {
    buffer: Mutex<RingBuffer<T>>,
    counters: StoreCounters,
    log_evictions: bool,
}

impl<T> SynchronizedStore<T> {
    /// Create an empty store with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityTooSmall`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::from_buffer(RingBuffer::new(capacity)?))
    }

    /// Wrap an existing buffer, e.g. one rebuilt from an export.
    #[must_use]
    pub fn from_buffer(buffer: RingBuffer<T>) -> Self {
        Self {
            buffer: Mutex::new(buffer),
            counters: StoreCounters::new(),
            log_evictions: false,
        }
    }

    /// Emit a `debug` event for every eviction.
    #[must_use]
    pub fn with_eviction_logging(mut self, enabled: bool) -> Self {
        self.log_evictions = enabled;
        self
    }

    /// Append an element, returning the evicted oldest element if the store
    /// was full.
    pub fn append(&self, item: T) -> Option<T> {
        let mut buffer = self.buffer.lock();
        let evicted = buffer.append(item);
        self.counters.record_append(evicted.is_some());
        if evicted.is_some() && self.log_evictions {
            debug!(capacity = buffer.capacity(), "evicted oldest element");
        }
        evicted
    }

    /// Append every element as one atomic step.
    ///
    /// No concurrent reader observes a prefix of the batch. Returns the
    /// evicted elements in eviction order.
    pub fn append_all<I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut buffer = self.buffer.lock();
        let mut evicted = Vec::new();
        for item in items {
            let out = buffer.append(item);
            self.counters.record_append(out.is_some());
            evicted.extend(out);
        }
        if !evicted.is_empty() && self.log_evictions {
            debug!(
                capacity = buffer.capacity(),
                evicted = evicted.len(),
                "batch append evicted oldest elements"
            );
        }
        evicted
    }

    /// Run `transform` against one consistent view of the buffer.
    ///
    /// The lock is held for the whole call, so no append can interleave with
    /// it.
    pub fn perform_batch_read<R, F>(&self, transform: F) -> R
    where
        F: FnOnce(&RingBuffer<T>) -> R,
    {
        let buffer = self.buffer.lock();
        transform(&buffer)
    }

    /// Occupancy statistics, computed under the lock.
    pub fn statistics(&self) -> BufferStatistics {
        self.buffer.lock().statistics()
    }

    /// Remove every element. Capacity is unchanged.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    /// Number of elements currently held.
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    /// Maximum number of elements.
    pub fn capacity(&self) -> usize {
        self.buffer.lock().capacity()
    }

    /// Check if the store holds no elements.
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Lifetime append/eviction tallies.
    pub fn counters(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }
}

impl<T: Clone> SynchronizedStore<T> {
    /// Oldest element, without removing it.
    pub fn peek(&self) -> Option<T> {
        self.buffer.lock().peek().cloned()
    }

    /// Newest element, without removing it.
    pub fn peek_last(&self) -> Option<T> {
        self.buffer.lock().peek_last().cloned()
    }

    /// Owned snapshot of the contents, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.lock().to_vec()
    }

    /// Independent copy of the guarded buffer, capacity included.
    pub fn snapshot(&self) -> RingBuffer<T> {
        self.buffer.lock().clone()
    }

    /// Elements matching `predicate`, oldest first.
    ///
    /// The predicate runs over a copy taken under the lock, never over the
    /// live buffer, so a slow predicate does not stall writers.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        let snapshot = self.to_vec();
        snapshot.into_iter().filter(|item| predicate(item)).collect()
    }

    /// Replace the guarded buffer with one of `new_capacity`.
    ///
    /// Keeps the most recent `min(len, new_capacity)` elements. Dropped
    /// elements are counted but not returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityTooSmall`] if `new_capacity` is zero;
    /// the store is left unchanged.
    pub fn resize(&self, new_capacity: usize) -> Result<(), ConfigError> {
        let mut buffer = self.buffer.lock();
        let resized = buffer.resized(new_capacity)?;
        let discarded = buffer.len().saturating_sub(resized.len());
        debug!(
            old_capacity = buffer.capacity(),
            new_capacity,
            discarded,
            "store resized"
        );
        self.counters.record_discarded(discarded as u64);
        *buffer = resized;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_append_and_evict() -> TestResult {
        let store = SynchronizedStore::new(2)?;
        assert_eq!(store.append("a"), None);
        assert_eq!(store.append("b"), None);
        assert_eq!(store.append("c"), Some("a"));
        assert_eq!(store.to_vec(), vec!["b", "c"]);

        let counters = store.counters();
        assert_eq!(counters.appended, 3);
        assert_eq!(counters.evicted, 1);
        Ok(())
    }

    #[test]
    fn test_append_all_returns_evicted_in_order() -> TestResult {
        let store = SynchronizedStore::new(3)?;
        let evicted = store.append_all(1..=5);
        assert_eq!(evicted, vec![1, 2]);
        assert_eq!(store.to_vec(), vec![3, 4, 5]);
        Ok(())
    }

    #[test]
    fn test_filter_over_snapshot() -> TestResult {
        let store = SynchronizedStore::new(10)?;
        store.append_all(0..10);
        let odd = store.filter(|n| n % 2 == 1);
        assert_eq!(odd, vec![1, 3, 5, 7, 9]);
        Ok(())
    }

    #[test]
    fn test_batch_read_sees_consistent_view() -> TestResult {
        let store = SynchronizedStore::new(4)?;
        store.append_all([10, 20, 30]);

        let (sum, len, stats) = store.perform_batch_read(|buffer| {
            (buffer.iter().sum::<i32>(), buffer.len(), buffer.statistics())
        });

        assert_eq!(sum, 60);
        assert_eq!(len, 3);
        assert_eq!(stats.current_count, 3);
        Ok(())
    }

    #[test]
    fn test_resize_in_store() -> TestResult {
        let store = SynchronizedStore::new(5)?;
        store.append_all(1..=5);

        store.resize(3)?;

        assert_eq!(store.capacity(), 3);
        assert_eq!(store.to_vec(), vec![3, 4, 5]);
        assert_eq!(store.counters().discarded_on_resize, 2);
        Ok(())
    }

    #[test]
    fn test_resize_zero_leaves_store_unchanged() -> TestResult {
        let store = SynchronizedStore::new(2)?;
        store.append(1);
        assert!(store.resize(0).is_err());
        assert_eq!(store.capacity(), 2);
        assert_eq!(store.to_vec(), vec![1]);
        Ok(())
    }

    #[test]
    fn test_peek_variants() -> TestResult {
        let store = SynchronizedStore::new(3)?;
        assert_eq!(store.peek(), None::<u8>);
        store.append_all([1, 2, 3, 4]);
        assert_eq!(store.peek(), Some(2));
        assert_eq!(store.peek_last(), Some(4));
        Ok(())
    }

    #[test]
    fn test_snapshot_is_independent() -> TestResult {
        let store = SynchronizedStore::new(3)?;
        store.append(1);
        let snapshot = store.snapshot();
        store.append(2);
        assert_eq!(snapshot.to_vec(), vec![1]);
        assert_eq!(snapshot.capacity(), 3);
        Ok(())
    }
}
