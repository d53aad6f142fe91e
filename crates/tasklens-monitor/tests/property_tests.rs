//! Property-based tests for performance report invariants.

use proptest::prelude::*;
use tasklens_monitor::{AccessPatternMonitor, AccessSample, MonitorConfig, OperationStats};

proptest! {
    #[test]
    fn test_report_rates_stay_in_range(
        samples in prop::collection::vec((0.0f64..1.0, any::<bool>(), 0usize..4), 0..200),
    ) {
        let monitor = AccessPatternMonitor::default();
        for (duration, success, op) in &samples {
            monitor.record_access_secs(&format!("op{op}"), *duration, *success);
        }

        let report = monitor.performance_report();
        prop_assert_eq!(report.total_operations, samples.len() as u64);
        prop_assert!((0.0..=1.0).contains(&report.success_rate));
        prop_assert!((0.0..=100.0).contains(&report.slow_operation_percentage));
        prop_assert!(report.slow_operations <= report.total_operations);
        prop_assert!(report.failed_operations <= report.total_operations);

        let summed: u64 = report.operation_stats.values().map(|s| s.total_calls).sum();
        prop_assert_eq!(summed, report.total_operations);
    }

    #[test]
    fn test_average_is_between_min_and_max(
        durations in prop::collection::vec(0.0f64..10.0, 1..100),
    ) {
        let samples: Vec<_> = durations.iter().map(|d| AccessSample::new(*d, true)).collect();
        let stats = OperationStats::from_samples(&samples, 0.1);

        let min = durations.iter().copied().fold(f64::INFINITY, f64::min);
        let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(stats.average_time >= min - 1e-9);
        prop_assert!(stats.average_time <= max + 1e-9);
    }

    #[test]
    fn test_history_never_exceeds_capacity(
        capacity in 1usize..32,
        records in 0usize..200,
    ) {
        let config = MonitorConfig::builder()
            .history_capacity(capacity)
            .build()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let monitor = AccessPatternMonitor::new(config).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for _ in 0..records {
            monitor.record_access_secs("op", 0.01, true);
        }
        let report = monitor.performance_report();
        let calls = report
            .operation_stats
            .get("op")
            .map_or(0, |s| s.total_calls);
        prop_assert_eq!(calls, records.min(capacity) as u64);
        prop_assert_eq!(report.operation_stats.len(), usize::from(records > 0));
    }
}
