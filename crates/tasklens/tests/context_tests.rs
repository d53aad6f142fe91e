//! End-to-end tests through the telemetry context.

use chrono::{TimeDelta, TimeZone, Utc};
use tasklens::prelude::*;
use tasklens::{MonitorConfig, operations};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn context_with(capacity: usize) -> Result<TelemetryContext, ConfigError> {
    TelemetryContext::new(TelemetryConfig::builder().event_capacity(capacity).build()?)
}

#[test]
fn test_lifecycle_statistics_scenario() -> TestResult {
    let context = context_with(16)?;
    let t0 = Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).single().ok_or("bad timestamp")?;

    context.record_event(TaskEvent::scheduled("X").with_timestamp(t0));
    context.record_event(TaskEvent::execution_started("X").with_timestamp(t0 + TimeDelta::seconds(1)));
    context.record_event(
        TaskEvent::execution_completed("X", 5.0, true).with_timestamp(t0 + TimeDelta::seconds(6)),
    );

    let report = context.generate_statistics_in(None, &Utc);
    assert_eq!(report.total_scheduled, 1);
    assert_eq!(report.total_executed, 1);
    assert_eq!(report.total_completed, 1);
    assert!((report.success_rate - 1.0).abs() < f64::EPSILON);
    assert!((report.average_execution_time - 5.0).abs() < f64::EPSILON);
    assert_eq!(report.executions_by_hour.get(&10), Some(&1));

    let metrics = context
        .task_performance_metrics_in("X", &Utc)
        .ok_or("missing task metrics")?;
    assert!(metrics.statistics.matches_ignoring_timestamp(&report));
    Ok(())
}

#[test]
fn test_range_bounded_statistics() -> TestResult {
    let context = context_with(16)?;
    let now = Utc::now();
    context.record_event(TaskEvent::failed("old", "stale").with_timestamp(now - TimeDelta::days(2)));
    context.record_event(TaskEvent::failed("new", "fresh").with_timestamp(now));

    let range = DateRange::ending_at(now, TimeDelta::hours(1));
    let report = context.generate_statistics(Some(&range));
    assert_eq!(report.total_failed, 1);
    assert_eq!(report.errors_by_type.get("fresh"), Some(&1));
    assert!(!report.errors_by_type.contains_key("stale"));
    Ok(())
}

#[test]
fn test_empty_store_statistics() -> TestResult {
    let context = context_with(4)?;
    let report = context.generate_statistics(None);
    assert!(report.matches_ignoring_timestamp(&StatisticsReport::empty()));
    assert!(context.task_performance_metrics("nothing").is_none());

    let stats = context.buffer_statistics();
    assert!(stats.is_empty);
    assert_eq!(stats.available_space, 4);
    Ok(())
}

#[test]
fn test_resize_then_export_round_trip() -> TestResult {
    let context = context_with(5)?;
    context.record_events((0..5).map(|i| TaskEvent::scheduled(format!("t{i}"))));
    context.resize(3)?;

    let export = context.export();
    assert_eq!(export.buffer.capacity(), 3);
    assert_eq!(export.buffer_statistics.current_count, 3);
    assert!(export.is_consistent());
    assert_eq!(export.statistics.total_scheduled, 3);
    assert!(export.performance.operation(operations::RESIZE).is_some());

    let decoded = TelemetryExport::from_json(&export.to_json()?)?;
    assert_eq!(decoded, export);

    let ids: Vec<_> = decoded.buffer.iter().map(|e| e.task_identifier.as_str()).collect();
    assert_eq!(ids, vec!["t2", "t3", "t4"]);
    Ok(())
}

#[test]
fn test_export_file_round_trip() -> TestResult {
    let context = context_with(8)?;
    context.record_event(
        TaskEvent::execution_completed("upload", 0.75, true)
            .with_metadata("bytes", 4096)
            .with_environment(EnvironmentInfo::capture()),
    );
    let export = context.export();

    let path = std::env::temp_dir().join(format!("tasklens-export-{}.json", uuid::Uuid::new_v4()));
    export.write_to(&path)?;
    let restored = TelemetryExport::read_from(&path);
    std::fs::remove_file(&path)?;

    assert_eq!(restored?, export);
    Ok(())
}

#[test]
fn test_context_from_export_restores_events() -> TestResult {
    let context = context_with(4)?;
    context.record_events([TaskEvent::scheduled("a"), TaskEvent::scheduled("b")]);
    let export = context.export();

    let restored = TelemetryContext::from_export(export, TelemetryConfig::default())?;
    assert_eq!(restored.events(), context.events());
    assert_eq!(restored.buffer_statistics().capacity, 4);
    Ok(())
}

#[test]
fn test_shared_monitor_across_contexts() -> TestResult {
    let monitor = std::sync::Arc::new(tasklens::AccessPatternMonitor::new(MonitorConfig::default())?);
    let a = TelemetryContext::with_monitor(TelemetryConfig::default(), std::sync::Arc::clone(&monitor))?;
    let b = TelemetryContext::with_monitor(TelemetryConfig::default(), std::sync::Arc::clone(&monitor))?;

    a.record_event(TaskEvent::scheduled("a"));
    b.record_event(TaskEvent::scheduled("b"));

    assert_eq!(a.events().len(), 1);
    assert_eq!(
        monitor.operation_stats(operations::APPEND).map(|s| s.total_calls),
        Some(2)
    );
    Ok(())
}

#[test]
fn test_config_from_path() -> TestResult {
    let path = std::env::temp_dir().join(format!("tasklens-config-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, r#"{"event_capacity": 12, "monitor": {"history_capacity": 7}}"#)?;
    let config = TelemetryConfig::from_path(&path);
    std::fs::remove_file(&path)?;

    let config = config?;
    assert_eq!(config.event_capacity, 12);
    assert_eq!(config.monitor.history_capacity, 7);

    let missing = TelemetryConfig::from_path(std::env::temp_dir().join("tasklens-does-not-exist.json"));
    assert!(matches!(missing, Err(TelemetryError::Io(_))));
    Ok(())
}
