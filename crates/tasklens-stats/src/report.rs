//! Statistics report types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived statistics over an event sequence.
///
/// Every field is populated even for empty input: counts are zero and both
/// rates are `0.0`, never `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    /// `taskScheduled` events.
    pub total_scheduled: u64,
    /// `taskExecutionStarted` events.
    pub total_executed: u64,
    /// `taskExecutionCompleted` events.
    pub total_completed: u64,
    /// `taskFailed` events.
    pub total_failed: u64,
    /// `taskExpired` events.
    pub total_expired: u64,
    /// `taskCancelled` events.
    pub total_cancelled: u64,
    /// Successful completions over executions, in `0.0..=1.0`.
    pub success_rate: f64,
    /// Mean duration in seconds of completed events that carry one.
    pub average_execution_time: f64,
    /// Execution starts per local hour of day (`0..=23`). Hours with no
    /// executions are absent.
    pub executions_by_hour: BTreeMap<u32, u64>,
    /// Occurrences of each distinct error message, matched exactly.
    pub errors_by_type: BTreeMap<String, u64>,
    /// Timestamp of the most recent execution start or completion.
    pub last_execution_time: Option<DateTime<Utc>>,
    /// When this report was computed.
    pub generated_at: DateTime<Utc>,
}

impl StatisticsReport {
    /// A zero-valued report stamped now.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_scheduled: 0,
            total_executed: 0,
            total_completed: 0,
            total_failed: 0,
            total_expired: 0,
            total_cancelled: 0,
            success_rate: 0.0,
            average_execution_time: 0.0,
            executions_by_hour: BTreeMap::new(),
            errors_by_type: BTreeMap::new(),
            last_execution_time: None,
            generated_at: Utc::now(),
        }
    }

    /// Equality on every field except `generated_at`.
    #[must_use]
    pub fn matches_ignoring_timestamp(&self, other: &Self) -> bool {
        let aligned = Self {
            generated_at: other.generated_at,
            ..self.clone()
        };
        aligned == *other
    }

    /// Total events counted into one of the lifecycle totals.
    #[must_use]
    pub fn total_events(&self) -> u64 {
        [
            self.total_scheduled,
            self.total_executed,
            self.total_completed,
            self.total_failed,
            self.total_expired,
            self.total_cancelled,
        ]
        .iter()
        .fold(0_u64, |acc, n| acc.saturating_add(*n))
    }

    /// The most frequent error message and its count. Ties resolve to the
    /// lexicographically smallest message.
    #[must_use]
    pub fn most_common_error(&self) -> Option<(&str, u64)> {
        self.errors_by_type
            .iter()
            .fold(None, |best: Option<(&str, u64)>, (message, count)| match best {
                Some((_, best_count)) if best_count >= *count => best,
                _ => Some((message.as_str(), *count)),
            })
    }

    /// The hour of day with the most execution starts.
    #[must_use]
    pub fn busiest_hour(&self) -> Option<u32> {
        self.executions_by_hour
            .iter()
            .fold(None, |best: Option<(u32, u64)>, (hour, count)| match best {
                Some((_, best_count)) if best_count >= *count => best,
                _ => Some((*hour, *count)),
            })
            .map(|(hour, _)| hour)
    }
}

impl Default for StatisticsReport {
    fn default() -> Self {
        Self::empty()
    }
}

/// Statistics restricted to one task identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPerformanceMetrics {
    /// The task these statistics describe.
    pub task_identifier: String,
    /// Statistics over that task's events only.
    pub statistics: StatisticsReport,
}
