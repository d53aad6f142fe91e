//! Property-based tests for the statistics aggregator.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use tasklens_events::{EventType, TaskEvent};
use tasklens_stats::{DateRange, generate_statistics_in, task_performance_metrics_in};

fn base_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn arb_event() -> impl Strategy<Value = TaskEvent> {
    (
        0usize..7,
        prop::sample::select(vec!["alpha", "beta", "gamma"]),
        0i64..172_800,
        prop::option::of(0.0f64..100.0),
        any::<bool>(),
        prop::option::of(prop::sample::select(vec!["timeout", "oom", "denied"])),
    )
        .prop_map(|(kind, task, offset, duration, success, error)| {
            let event_type = EventType::KNOWN
                .get(kind)
                .cloned()
                .unwrap_or_else(|| EventType::Custom("heartbeat".into()));
            let mut event = TaskEvent::new(event_type, task)
                .with_timestamp(base_time() + TimeDelta::seconds(offset))
                .with_success(success);
            event.duration = duration;
            event.error_message = error.map(str::to_string);
            event
        })
}

proptest! {
    #[test]
    fn test_report_is_deterministic(events in prop::collection::vec(arb_event(), 0..60)) {
        let first = generate_statistics_in(&events, None, &Utc);
        let second = generate_statistics_in(&events, None, &Utc);
        prop_assert!(first.matches_ignoring_timestamp(&second));
    }

    #[test]
    fn test_rates_are_bounded(events in prop::collection::vec(arb_event(), 0..60)) {
        let report = generate_statistics_in(&events, None, &Utc);
        prop_assert!((0.0..=1.0).contains(&report.success_rate));
        prop_assert!(report.average_execution_time >= 0.0);
        prop_assert!(!report.average_execution_time.is_nan());

        let hourly: u64 = report.executions_by_hour.values().sum();
        prop_assert_eq!(hourly, report.total_executed);
        prop_assert!(report.executions_by_hour.keys().all(|h| *h < 24));

        let errors: u64 = report.errors_by_type.values().sum();
        let with_errors = events.iter().filter(|e| e.error_message.is_some()).count() as u64;
        prop_assert_eq!(errors, with_errors);
    }

    #[test]
    fn test_range_partition_sums(
        events in prop::collection::vec(arb_event(), 0..60),
        split in 0i64..172_800,
    ) {
        let mid = base_time() + TimeDelta::seconds(split);
        let early = DateRange::new(base_time() - TimeDelta::seconds(1), mid);
        let late = DateRange::new(mid + TimeDelta::nanoseconds(1), base_time() + TimeDelta::days(3));

        let all = generate_statistics_in(&events, None, &Utc);
        let a = generate_statistics_in(&events, Some(&early), &Utc);
        let b = generate_statistics_in(&events, Some(&late), &Utc);

        prop_assert_eq!(a.total_scheduled + b.total_scheduled, all.total_scheduled);
        prop_assert_eq!(a.total_executed + b.total_executed, all.total_executed);
        prop_assert_eq!(a.total_failed + b.total_failed, all.total_failed);
    }

    #[test]
    fn test_task_metrics_presence(events in prop::collection::vec(arb_event(), 0..40)) {
        for task in ["alpha", "beta", "gamma", "delta"] {
            let present = events.iter().any(|e| e.task_identifier == task);
            let metrics = task_performance_metrics_in(&events, task, &Utc);
            prop_assert_eq!(metrics.is_some(), present);
        }
    }
}
