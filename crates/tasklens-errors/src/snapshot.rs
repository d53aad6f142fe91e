//! Snapshot rebuild errors.
//!
//! An exported buffer carries its capacity and its ordered elements. Decoding
//! rejects snapshots that could never have been produced by a live buffer.

use crate::common::ErrorSeverity;

/// Errors raised while rebuilding a buffer from an exported snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// More elements than the declared capacity
    #[error("snapshot holds {len} elements but its capacity is {capacity}")]
    ExceedsCapacity {
        /// Declared capacity
        capacity: usize,
        /// Number of elements in the snapshot
        len: usize,
    },
}

impl SnapshotError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create an exceeds-capacity error.
    pub fn exceeds_capacity(capacity: usize, len: usize) -> Self {
        SnapshotError::ExceedsCapacity { capacity, len }
    }
}
