//! The access pattern monitor.
//!
//! One [`AccessPatternMonitor`] is created per process (or per test) and
//! passed to every collaborator that records or queries timings. Each
//! operation name maps to its own [`SynchronizedStore`] of samples, so the
//! rolling history per operation is bounded by
//! [`MonitorConfig::history_capacity`].
//!
//! # Thread Safety
//!
//! The bucket map sits behind a `parking_lot::RwLock`. Recording to a known
//! operation appends through the bucket's own mutex while holding the map's
//! read lock. Only the first call for a new name takes the write lock.
//! [`AccessPatternMonitor::reset`] takes the write lock, so it waits for
//! in-flight appends and no sample lands in a dropped bucket.

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tasklens_buffer::{RingBuffer, SynchronizedStore};
use tasklens_errors::ConfigResult;
use tracing::trace;

use crate::config::MonitorConfig;
use crate::report::{OperationStats, PerformanceReport};
use crate::sample::AccessSample;

type Bucket = Arc<SynchronizedStore<AccessSample>>;

/// Records operation timings and aggregates them into reports.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tasklens_monitor::{AccessPatternMonitor, MonitorConfig};
///
/// let monitor = AccessPatternMonitor::new(MonitorConfig::default())?;
/// monitor.record_access("db.query", Duration::from_millis(250), true);
/// monitor.record_access("cache.get", Duration::from_millis(2), true);
///
/// let report = monitor.performance_report();
/// assert_eq!(report.total_operations, 2);
/// assert_eq!(report.slow_operations, 1);
/// # Ok::<(), tasklens_errors::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct AccessPatternMonitor {
    config: MonitorConfig,
    empty_history: RingBuffer<AccessSample>,
    buckets: RwLock<HashMap<String, Bucket>>,
}

impl AccessPatternMonitor {
    /// Create a monitor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: MonitorConfig) -> ConfigResult<Self> {
        config.validate()?;
        let empty_history = RingBuffer::new(config.history_capacity)?;
        Ok(Self {
            config,
            empty_history,
            buckets: RwLock::new(HashMap::new()),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Record one call to `operation`.
    pub fn record_access(&self, operation: &str, duration: Duration, success: bool) {
        self.record_sample(operation, AccessSample::new(duration.as_secs_f64(), success));
    }

    /// Record one call to `operation` with its duration in seconds.
    ///
    /// Negative or non-finite durations are recorded as zero.
    pub fn record_access_secs(&self, operation: &str, duration_secs: f64, success: bool) {
        let duration_secs = if duration_secs.is_finite() {
            duration_secs.max(0.0)
        } else {
            0.0
        };
        self.record_sample(operation, AccessSample::new(duration_secs, success));
    }

    /// Run `f`, recording its wall time under `operation`. An `Err` result
    /// is recorded as a failed call and passed through unchanged.
    pub fn time<T, E, F>(&self, operation: &str, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let start = Instant::now();
        let result = f();
        self.record_access(operation, start.elapsed(), result.is_ok());
        result
    }

    /// Run an infallible `f`, recording its wall time under `operation`.
    pub fn time_infallible<T, F>(&self, operation: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let value = f();
        self.record_access(operation, start.elapsed(), true);
        value
    }

    // The map lock is held across the append; see the module docs.
    fn record_sample(&self, operation: &str, sample: AccessSample) {
        {
            let buckets = self.buckets.read();
            if let Some(bucket) = buckets.get(operation) {
                bucket.append(sample);
                return;
            }
        }

        let mut buckets = self.buckets.write();
        let bucket = buckets.entry(operation.to_string()).or_insert_with(|| {
            trace!(operation, capacity = self.config.history_capacity, "new operation bucket");
            Arc::new(SynchronizedStore::from_buffer(self.empty_history.clone()))
        });
        bucket.append(sample);
    }

    /// Aggregate every bucket's retained samples.
    pub fn performance_report(&self) -> PerformanceReport {
        let threshold = self.config.slow_threshold_secs;
        let buckets: Vec<(String, Bucket)> = self
            .buckets
            .read()
            .iter()
            .map(|(name, bucket)| (name.clone(), Arc::clone(bucket)))
            .collect();

        let operation_stats: BTreeMap<String, OperationStats> = buckets
            .into_iter()
            .map(|(name, bucket)| {
                let stats = bucket
                    .perform_batch_read(|history| OperationStats::from_samples(history, threshold));
                (name, stats)
            })
            .collect();

        PerformanceReport::from_operation_stats(operation_stats)
    }

    /// Stats for a single operation, if it has been recorded.
    pub fn operation_stats(&self, operation: &str) -> Option<OperationStats> {
        let bucket = self.buckets.read().get(operation).map(Arc::clone)?;
        let threshold = self.config.slow_threshold_secs;
        Some(bucket.perform_batch_read(|history| OperationStats::from_samples(history, threshold)))
    }

    /// Retained samples for `operation`, oldest first.
    pub fn history(&self, operation: &str) -> Vec<AccessSample> {
        self.buckets
            .read()
            .get(operation)
            .map(|bucket| bucket.to_vec())
            .unwrap_or_default()
    }

    /// Recorded operation names, sorted.
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.buckets.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every bucket.
    ///
    /// Appends already holding the map lock finish first; samples recorded
    /// after `reset` returns start fresh buckets.
    pub fn reset(&self) {
        self.buckets.write().clear();
    }
}

impl Default for AccessPatternMonitor {
    fn default() -> Self {
        let config = MonitorConfig::default();
        let capacity = NonZeroUsize::new(config.history_capacity).unwrap_or(NonZeroUsize::MIN);
        let empty_history = RingBuffer::with_capacity(capacity);
        Self {
            config,
            empty_history,
            buckets: RwLock::new(HashMap::new()),
        }
    }
}
