//! Inclusive time ranges for filtering events.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Closed interval `[start, end]` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First included instant.
    pub start: DateTime<Utc>,
    /// Last included instant.
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range. Bounds given in reverse order are swapped.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// The window of length `span` ending now.
    #[must_use]
    pub fn last(span: TimeDelta) -> Self {
        Self::ending_at(Utc::now(), span)
    }

    /// The window of length `span` ending at `end`.
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, span: TimeDelta) -> Self {
        let start = end
            .checked_sub_signed(span.abs())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end }
    }

    /// True when `instant` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Length of the range.
    #[must_use]
    pub fn span(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }
}
