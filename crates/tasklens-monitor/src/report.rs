//! Aggregated performance reports.
//!
//! Reports are computed on demand from the samples each operation bucket
//! currently retains. Evicted samples no longer contribute.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sample::AccessSample;

/// Aggregate over one operation's retained samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    /// Mean duration in seconds, `0.0` with no samples.
    pub average_time: f64,
    /// Retained samples.
    pub total_calls: u64,
    /// Samples strictly slower than the slow threshold.
    pub slow_calls: u64,
    /// Samples recorded as failed.
    pub failed_calls: u64,
}

impl OperationStats {
    /// Aggregate `samples` against `slow_threshold_secs`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_samples<'a, I>(samples: I, slow_threshold_secs: f64) -> Self
    where
        I: IntoIterator<Item = &'a AccessSample>,
    {
        let mut stats = Self::default();
        for sample in samples {
            stats.total_calls = stats.total_calls.saturating_add(1);
            // Running mean, finite for finite samples.
            let n = stats.total_calls as f64;
            stats.average_time = stats.average_time - stats.average_time / n + sample.duration_secs / n;
            if sample.is_slow(slow_threshold_secs) {
                stats.slow_calls = stats.slow_calls.saturating_add(1);
            }
            if !sample.success {
                stats.failed_calls = stats.failed_calls.saturating_add(1);
            }
        }
        stats
    }
}

/// Performance across every recorded operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Per-operation aggregates, keyed by operation name.
    pub operation_stats: BTreeMap<String, OperationStats>,
    /// Retained samples across all operations.
    pub total_operations: u64,
    /// Fraction of calls that succeeded, in `0.0..=1.0`; `0.0` with no calls.
    pub success_rate: f64,
    /// Calls strictly slower than the slow threshold.
    pub slow_operations: u64,
    /// `100 * slow_operations / total_operations`; `0.0` with no calls.
    pub slow_operation_percentage: f64,
    /// Calls recorded as failed.
    pub failed_operations: u64,
    /// When this report was computed.
    pub generated_at: DateTime<Utc>,
}

impl PerformanceReport {
    /// Fold per-operation aggregates into a report stamped now.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_operation_stats(operation_stats: BTreeMap<String, OperationStats>) -> Self {
        let mut total_operations = 0_u64;
        let mut slow_operations = 0_u64;
        let mut failed_operations = 0_u64;
        for stats in operation_stats.values() {
            total_operations = total_operations.saturating_add(stats.total_calls);
            slow_operations = slow_operations.saturating_add(stats.slow_calls);
            failed_operations = failed_operations.saturating_add(stats.failed_calls);
        }

        let (success_rate, slow_operation_percentage) = if total_operations == 0 {
            (0.0, 0.0)
        } else {
            let total = total_operations as f64;
            let succeeded = total_operations.saturating_sub(failed_operations) as f64;
            (succeeded / total, slow_operations as f64 / total * 100.0)
        };

        Self {
            operation_stats,
            total_operations,
            success_rate,
            slow_operations,
            slow_operation_percentage,
            failed_operations,
            generated_at: Utc::now(),
        }
    }

    /// Stats for one operation, if it has been recorded.
    #[must_use]
    pub fn operation(&self, name: &str) -> Option<&OperationStats> {
        self.operation_stats.get(name)
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_operations == 0
    }
}

impl Default for PerformanceReport {
    fn default() -> Self {
        Self::from_operation_stats(BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_stats_from_samples() {
        let samples = [
            AccessSample::new(0.05, true),
            AccessSample::new(0.15, false),
            AccessSample::new(0.10, true),
        ];
        let stats = OperationStats::from_samples(&samples, 0.1);
        assert_eq!(stats.total_calls, 3);
        assert_eq!(stats.slow_calls, 1);
        assert_eq!(stats.failed_calls, 1);
        assert!((stats.average_time - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_huge_samples_keep_a_finite_average() {
        let samples = [AccessSample::new(f64::MAX, true), AccessSample::new(f64::MAX, true)];
        let stats = OperationStats::from_samples(&samples, 0.1);
        assert!(stats.average_time.is_finite());
        assert_eq!(stats.slow_calls, 2);
    }

    #[test]
    fn test_threshold_is_strict() {
        let samples = [AccessSample::new(0.1, true)];
        let stats = OperationStats::from_samples(&samples, 0.1);
        assert_eq!(stats.slow_calls, 0);
    }

    #[test]
    fn test_empty_report_is_zeroed() {
        let report = PerformanceReport::default();
        assert!(report.is_empty());
        assert_eq!(report.slow_operations, 0);
        assert!(report.success_rate.abs() < f64::EPSILON);
        assert!(report.slow_operation_percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_totals() {
        let mut operation_stats = BTreeMap::new();
        operation_stats.insert(
            "a".to_string(),
            OperationStats {
                average_time: 0.01,
                total_calls: 3,
                slow_calls: 0,
                failed_calls: 1,
            },
        );
        operation_stats.insert(
            "b".to_string(),
            OperationStats {
                average_time: 0.2,
                total_calls: 1,
                slow_calls: 1,
                failed_calls: 0,
            },
        );
        let report = PerformanceReport::from_operation_stats(operation_stats);
        assert_eq!(report.total_operations, 4);
        assert_eq!(report.failed_operations, 1);
        assert_eq!(report.slow_operations, 1);
        assert!((report.success_rate - 0.75).abs() < f64::EPSILON);
        assert!((report.slow_operation_percentage - 25.0).abs() < f64::EPSILON);
        assert!(report.operation("missing").is_none());
    }
}
