//! Fixed-capacity FIFO ring buffer.
//!
//! [`RingBuffer`] is the foundation of the telemetry store: a bounded window
//! that overwrites its oldest element once full. It is not synchronized; wrap
//! it in a [`SynchronizedStore`](crate::SynchronizedStore) to share it.
//!
//! # Ordering
//!
//! Iteration, [`RingBuffer::to_vec`] and serialization always yield elements
//! oldest first.
//!
//! # Storage
//!
//! Capacity is a bound, not a reservation. Slots are allocated as elements
//! arrive, so a snapshot declaring a huge capacity decodes without allocating
//! for it.

use core::fmt;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use std::collections::{VecDeque, vec_deque};

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tasklens_errors::{ConfigError, SnapshotError, TelemetryError};

use crate::statistics::BufferStatistics;

/// Fixed-capacity FIFO container that evicts its oldest element on overflow.
///
/// # Example
///
/// ```rust
/// use tasklens_buffer::RingBuffer;
///
/// let mut buffer = RingBuffer::new(2)?;
/// assert_eq!(buffer.append("a"), None);
/// assert_eq!(buffer.append("b"), None);
/// assert_eq!(buffer.append("c"), Some("a"));
/// assert_eq!(buffer.to_vec(), vec!["b", "c"]);
/// # Ok::<(), tasklens_errors::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct RingBuffer<T> {
    elements: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer holding at most `capacity` elements.
    ///
    /// Storage grows on demand up to `capacity`; nothing is reserved up
    /// front.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityTooSmall`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = ConfigError::check_capacity("capacity", capacity)?;
        Ok(Self::with_valid_capacity(capacity))
    }

    /// Create an empty buffer from a capacity that cannot be zero.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self::with_valid_capacity(capacity.get())
    }

    fn with_valid_capacity(capacity: usize) -> Self {
        Self {
            elements: VecDeque::new(),
            capacity,
        }
    }

    /// Rebuild a buffer from an exported capacity and ordered elements.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `capacity` is zero, or a snapshot
    /// error if there are more elements than `capacity`.
    pub fn from_parts(capacity: usize, elements: Vec<T>) -> Result<Self, TelemetryError> {
        let mut buffer = Self::new(capacity)?;
        if elements.len() > capacity {
            return Err(SnapshotError::exceeds_capacity(capacity, elements.len()).into());
        }
        buffer.elements = VecDeque::from(elements);
        Ok(buffer)
    }

    /// Insert at the logical end.
    ///
    /// When the buffer is full the oldest element is evicted and returned to
    /// the caller; otherwise returns `None`. Amortized O(1).
    pub fn append(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.elements.pop_front()
        } else {
            None
        };
        self.elements.push_back(item);
        evicted
    }

    /// Oldest element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.elements.front()
    }

    /// Newest element, without removing it.
    pub fn peek_last(&self) -> Option<&T> {
        self.elements.back()
    }

    /// Borrowing iterator, oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.elements.iter(),
        }
    }

    /// Remove every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Number of elements currently held.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Maximum number of elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Check if the next append will evict.
    pub fn is_full(&self) -> bool {
        self.elements.len() >= self.capacity
    }

    /// Free slots before the next append evicts.
    pub fn available_space(&self) -> usize {
        self.capacity.saturating_sub(self.elements.len())
    }

    /// Occupancy figures for the current state.
    pub fn statistics(&self) -> BufferStatistics {
        BufferStatistics::new(self.capacity, self.elements.len())
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Owned snapshot of the contents, oldest first.
    ///
    /// The returned vector shares nothing with the buffer; later appends are
    /// not observable through it.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Build a new buffer of `new_capacity` holding the most recent
    /// `min(len, new_capacity)` elements in their original order.
    ///
    /// The receiver is left untouched. Elements that do not fit are dropped
    /// without being reported, unlike eviction through [`RingBuffer::append`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityTooSmall`] if `new_capacity` is zero.
    pub fn resized(&self, new_capacity: usize) -> Result<Self, ConfigError> {
        let new_capacity = ConfigError::check_capacity("new_capacity", new_capacity)?;
        let mut resized = Self::with_valid_capacity(new_capacity);
        let skip = self.elements.len().saturating_sub(new_capacity);
        resized.elements.extend(self.elements.iter().skip(skip).cloned());
        Ok(resized)
    }
}

// Equality is logical: same capacity, same elements in the same order.
impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("elements", &OrderedElements(self))
            .finish()
    }
}

/// Iterator over a [`RingBuffer`], oldest to newest.
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: vec_deque::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct OrderedElements<'a, T>(&'a RingBuffer<T>);

impl<T: Serialize> Serialize for OrderedElements<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedElements<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Serialize> Serialize for RingBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RingBuffer", 2)?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("elements", &OrderedElements(self))?;
        state.end()
    }
}

#[derive(Deserialize)]
struct RingBufferRepr<T> {
    capacity: usize,
    elements: Vec<T>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for RingBuffer<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RingBufferRepr::<T>::deserialize(deserializer)?;
        RingBuffer::from_parts(repr.capacity, repr.elements).map_err(D::Error::custom)
    }
}
