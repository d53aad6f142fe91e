//! Lifetime counters for a synchronized store.
//!
//! The counters live beside the guarded buffer in plain atomics, so they can
//! be read without contending for the buffer lock.
//!
//! All counters use `Ordering::Relaxed`: they are monotonic tallies and are
//! not used to synchronize with the buffer contents.

use core::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter snapshot returned by [`StoreCounters::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterSnapshot {
    /// Elements appended since creation.
    pub appended: u64,
    /// Elements evicted by appends since creation.
    pub evicted: u64,
    /// Elements dropped by shrinking resizes since creation.
    pub discarded_on_resize: u64,
}

/// Atomic tallies of store traffic.
#[derive(Debug, Default)]
pub struct StoreCounters {
    appended: AtomicU64,
    evicted: AtomicU64,
    discarded_on_resize: AtomicU64,
}

impl StoreCounters {
    /// Create counters initialized to zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            appended: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
            discarded_on_resize: AtomicU64::new(0),
        }
    }

    /// Record one append and whether it evicted.
    #[inline]
    pub fn record_append(&self, evicted: bool) {
        self.appended.fetch_add(1, Ordering::Relaxed);
        if evicted {
            self.evicted.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record elements dropped by a resize.
    #[inline]
    pub fn record_discarded(&self, count: u64) {
        self.discarded_on_resize.fetch_add(count, Ordering::Relaxed);
    }

    /// Read all counters.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            appended: self.appended.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            discarded_on_resize: self.discarded_on_resize.load(Ordering::Relaxed),
        }
    }
}
