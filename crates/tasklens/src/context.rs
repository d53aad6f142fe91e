//! The shared telemetry handle.
//!
//! A [`TelemetryContext`] is built once at startup and cloned into every
//! producer and consumer. Clones share one event store and one access
//! pattern monitor. Every store operation issued through the context is timed
//! and recorded under the names in [`operations`].

use std::sync::Arc;

use chrono::TimeZone;
use tasklens_buffer::{BufferStatistics, CounterSnapshot, SynchronizedStore};
use tasklens_errors::{ConfigResult, Result};
use tasklens_events::TaskEvent;
use tasklens_monitor::{AccessPatternMonitor, PerformanceReport};
use tasklens_stats::{
    DateRange, StatisticsReport, TaskPerformanceMetrics, generate_statistics,
    generate_statistics_in, task_performance_metrics, task_performance_metrics_in,
};
use tracing::info;

use crate::config::TelemetryConfig;
use crate::export::TelemetryExport;

/// Operation names recorded in the access pattern monitor.
pub mod operations {
    /// Single event append.
    pub const APPEND: &str = "store.append";
    /// Batch event append.
    pub const APPEND_ALL: &str = "store.append_all";
    /// Ordered copy of every event.
    pub const SNAPSHOT: &str = "store.snapshot";
    /// Predicate filter over a copy.
    pub const FILTER: &str = "store.filter";
    /// Occupancy statistics.
    pub const STATISTICS: &str = "store.statistics";
    /// Aggregation under the store lock.
    pub const BATCH_READ: &str = "store.batch_read";
    /// Capacity change.
    pub const RESIZE: &str = "store.resize";
    /// Removal of every event.
    pub const CLEAR: &str = "store.clear";
    /// Full export.
    pub const EXPORT: &str = "store.export";
}

/// Cloneable handle over one event store and one monitor.
///
/// # Example
///
/// ```rust
/// use tasklens::prelude::*;
///
/// let context = TelemetryContext::new(TelemetryConfig::default())?;
/// context.record_event(TaskEvent::scheduled("X"));
/// context.record_event(TaskEvent::execution_started("X"));
/// context.record_event(TaskEvent::execution_completed("X", 5.0, true));
///
/// let stats = context.generate_statistics(None);
/// assert_eq!(stats.total_executed, 1);
///
/// let perf = context.performance_report();
/// assert_eq!(perf.operation("store.append").map(|s| s.total_calls), Some(3));
/// # Ok::<(), tasklens_errors::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TelemetryContext {
    store: Arc<SynchronizedStore<TaskEvent>>,
    monitor: Arc<AccessPatternMonitor>,
}

impl TelemetryContext {
    /// Build a context with a fresh store and monitor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: TelemetryConfig) -> ConfigResult<Self> {
        config.validate()?;
        let monitor = Arc::new(AccessPatternMonitor::new(config.monitor.clone())?);
        Self::with_monitor(config, monitor)
    }

    /// Build a context with a fresh store that records into an existing
    /// monitor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_monitor(
        config: TelemetryConfig,
        monitor: Arc<AccessPatternMonitor>,
    ) -> ConfigResult<Self> {
        config.validate()?;
        let store = SynchronizedStore::new(config.event_capacity)?
            .with_eviction_logging(config.log_evictions);
        info!(
            event_capacity = config.event_capacity,
            history_capacity = monitor.config().history_capacity,
            "telemetry context created"
        );
        Ok(Self {
            store: Arc::new(store),
            monitor,
        })
    }

    /// Rebuild a context from an export. The store holds the exported events
    /// at the exported capacity; the monitor starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_export(export: TelemetryExport, config: TelemetryConfig) -> Result<Self> {
        config.validate()?;
        let monitor = Arc::new(AccessPatternMonitor::new(config.monitor.clone())?);
        let store = SynchronizedStore::from_buffer(export.buffer)
            .with_eviction_logging(config.log_evictions);
        Ok(Self {
            store: Arc::new(store),
            monitor,
        })
    }

    /// The shared event store.
    pub fn store(&self) -> &Arc<SynchronizedStore<TaskEvent>> {
        &self.store
    }

    /// The shared monitor.
    pub fn monitor(&self) -> &Arc<AccessPatternMonitor> {
        &self.monitor
    }

    /// Append one event, returning the evicted oldest event if the store was
    /// full.
    pub fn record_event(&self, event: TaskEvent) -> Option<TaskEvent> {
        self.monitor
            .time_infallible(operations::APPEND, || self.store.append(event))
    }

    /// Append a batch atomically, returning evicted events oldest first.
    pub fn record_events<I>(&self, events: I) -> Vec<TaskEvent>
    where
        I: IntoIterator<Item = TaskEvent>,
    {
        self.monitor
            .time_infallible(operations::APPEND_ALL, || self.store.append_all(events))
    }

    /// Every retained event, oldest first.
    pub fn events(&self) -> Vec<TaskEvent> {
        self.monitor
            .time_infallible(operations::SNAPSHOT, || self.store.to_vec())
    }

    /// Retained events matching `predicate`, oldest first.
    pub fn filter_events<P>(&self, predicate: P) -> Vec<TaskEvent>
    where
        P: FnMut(&TaskEvent) -> bool,
    {
        self.monitor
            .time_infallible(operations::FILTER, || self.store.filter(predicate))
    }

    /// Store occupancy.
    pub fn buffer_statistics(&self) -> BufferStatistics {
        self.monitor
            .time_infallible(operations::STATISTICS, || self.store.statistics())
    }

    /// Lifetime append and eviction tallies.
    pub fn counters(&self) -> CounterSnapshot {
        self.store.counters()
    }

    /// Statistics over retained events, hour buckets in local time.
    pub fn generate_statistics(&self, range: Option<&DateRange>) -> StatisticsReport {
        self.monitor.time_infallible(operations::BATCH_READ, || {
            self.store
                .perform_batch_read(|events| generate_statistics(events, range))
        })
    }

    /// Statistics over retained events, hour buckets in `tz`.
    pub fn generate_statistics_in<Tz: TimeZone>(
        &self,
        range: Option<&DateRange>,
        tz: &Tz,
    ) -> StatisticsReport {
        self.monitor.time_infallible(operations::BATCH_READ, || {
            self.store
                .perform_batch_read(|events| generate_statistics_in(events, range, tz))
        })
    }

    /// Statistics for one task, hour buckets in local time. `None` when no
    /// retained event carries `task_identifier`.
    pub fn task_performance_metrics(&self, task_identifier: &str) -> Option<TaskPerformanceMetrics> {
        self.monitor.time_infallible(operations::BATCH_READ, || {
            self.store
                .perform_batch_read(|events| task_performance_metrics(events, task_identifier))
        })
    }

    /// Statistics for one task, hour buckets in `tz`.
    pub fn task_performance_metrics_in<Tz: TimeZone>(
        &self,
        task_identifier: &str,
        tz: &Tz,
    ) -> Option<TaskPerformanceMetrics> {
        self.monitor.time_infallible(operations::BATCH_READ, || {
            self.store.perform_batch_read(|events| {
                task_performance_metrics_in(events, task_identifier, tz)
            })
        })
    }

    /// Aggregated operation timings.
    pub fn performance_report(&self) -> PerformanceReport {
        self.monitor.performance_report()
    }

    /// Change the store capacity, keeping the most recent events.
    ///
    /// # Errors
    ///
    /// Returns an error if `new_capacity` is zero; the store is unchanged.
    pub fn resize(&self, new_capacity: usize) -> ConfigResult<()> {
        self.monitor
            .time(operations::RESIZE, || self.store.resize(new_capacity))
    }

    /// Remove every retained event. Monitor history is kept.
    pub fn clear(&self) {
        self.monitor
            .time_infallible(operations::CLEAR, || self.store.clear());
    }

    /// Capture the store, its statistics and the performance report.
    ///
    /// The buffer, its occupancy and the event statistics come from one
    /// consistent view of the store.
    pub fn export(&self) -> TelemetryExport {
        let (buffer, buffer_statistics, statistics) =
            self.monitor.time_infallible(operations::EXPORT, || {
                self.store.perform_batch_read(|events| {
                    (events.clone(), events.statistics(), generate_statistics(events, None))
                })
            });
        TelemetryExport::new(buffer, buffer_statistics, statistics, self.performance_report())
    }
}
