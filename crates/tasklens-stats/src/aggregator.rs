//! Statistics over task event sequences.
//!
//! Every function here is pure: no locks, no I/O, no clock reads beyond
//! stamping `generated_at`. The same input always yields the same report
//! apart from that stamp.
//!
//! Events are counted by type only. A completion with no matching start is
//! still a completion; nothing here checks lifecycle order.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use tasklens_events::{EventType, TaskEvent};

use crate::range::DateRange;
use crate::report::{StatisticsReport, TaskPerformanceMetrics};

/// Compute statistics over `events`, bucketing hours in the local time zone.
///
/// Only events inside `range` are counted when one is given.
pub fn generate_statistics<'a, I>(events: I, range: Option<&DateRange>) -> StatisticsReport
where
    I: IntoIterator<Item = &'a TaskEvent>,
{
    generate_statistics_in(events, range, &Local)
}

/// Compute statistics over `events`, bucketing hours in `tz`.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use tasklens_events::TaskEvent;
/// use tasklens_stats::generate_statistics_in;
///
/// let events = [
///     TaskEvent::scheduled("X"),
///     TaskEvent::execution_started("X"),
///     TaskEvent::execution_completed("X", 5.0, true),
/// ];
/// let report = generate_statistics_in(&events, None, &Utc);
/// assert_eq!(report.total_executed, 1);
/// assert!((report.success_rate - 1.0).abs() < f64::EPSILON);
/// assert!((report.average_execution_time - 5.0).abs() < f64::EPSILON);
/// ```
pub fn generate_statistics_in<'a, I, Tz>(
    events: I,
    range: Option<&DateRange>,
    tz: &Tz,
) -> StatisticsReport
where
    I: IntoIterator<Item = &'a TaskEvent>,
    Tz: TimeZone,
{
    let mut tally = Tally::default();
    for event in events {
        if range.is_none_or(|r| r.contains(event.timestamp)) {
            tally.observe(event, tz);
        }
    }
    tally.finish()
}

/// Statistics for one task, bucketing hours in the local time zone.
///
/// Returns `None` when no event carries `task_identifier`.
pub fn task_performance_metrics<'a, I>(
    events: I,
    task_identifier: &str,
) -> Option<TaskPerformanceMetrics>
where
    I: IntoIterator<Item = &'a TaskEvent>,
{
    task_performance_metrics_in(events, task_identifier, &Local)
}

/// Statistics for one task, bucketing hours in `tz`.
///
/// Returns `None` when no event carries `task_identifier`.
pub fn task_performance_metrics_in<'a, I, Tz>(
    events: I,
    task_identifier: &str,
    tz: &Tz,
) -> Option<TaskPerformanceMetrics>
where
    I: IntoIterator<Item = &'a TaskEvent>,
    Tz: TimeZone,
{
    let mut matched = events
        .into_iter()
        .filter(|event| event.task_identifier == task_identifier)
        .peekable();
    matched.peek()?;

    Some(TaskPerformanceMetrics {
        task_identifier: task_identifier.to_string(),
        statistics: generate_statistics_in(matched, None, tz),
    })
}

/// Statistics for every task present in `events`, keyed by identifier.
pub fn all_task_metrics_in<'a, I, Tz>(
    events: I,
    tz: &Tz,
) -> BTreeMap<String, TaskPerformanceMetrics>
where
    I: IntoIterator<Item = &'a TaskEvent>,
    Tz: TimeZone,
{
    let mut grouped: BTreeMap<&str, Tally> = BTreeMap::new();
    for event in events {
        grouped
            .entry(event.task_identifier.as_str())
            .or_default()
            .observe(event, tz);
    }
    grouped
        .into_iter()
        .map(|(task_identifier, tally)| {
            let metrics = TaskPerformanceMetrics {
                task_identifier: task_identifier.to_string(),
                statistics: tally.finish(),
            };
            (task_identifier.to_string(), metrics)
        })
        .collect()
}

/// Distinct task identifiers in `events`, sorted.
pub fn task_identifiers<'a, I>(events: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a TaskEvent>,
{
    events
        .into_iter()
        .map(|event| event.task_identifier.clone())
        .collect()
}

#[derive(Debug, Default)]
struct Tally {
    scheduled: u64,
    executed: u64,
    completed: u64,
    completed_successfully: u64,
    failed: u64,
    expired: u64,
    cancelled: u64,
    duration_mean: f64,
    duration_count: u64,
    executions_by_hour: BTreeMap<u32, u64>,
    errors_by_type: BTreeMap<String, u64>,
    last_execution_time: Option<DateTime<Utc>>,
}

impl Tally {
    fn observe<Tz: TimeZone>(&mut self, event: &TaskEvent, tz: &Tz) {
        match &event.event_type {
            EventType::TaskScheduled => bump(&mut self.scheduled),
            EventType::TaskExecutionStarted => {
                bump(&mut self.executed);
                let hour = event.timestamp.with_timezone(tz).hour();
                bump(self.executions_by_hour.entry(hour).or_default());
                self.note_execution(event.timestamp);
            }
            EventType::TaskExecutionCompleted => {
                bump(&mut self.completed);
                if event.success {
                    bump(&mut self.completed_successfully);
                }
                if let Some(duration) = event.duration.filter(|d| d.is_finite()) {
                    self.observe_duration(duration);
                }
                self.note_execution(event.timestamp);
            }
            EventType::TaskFailed => bump(&mut self.failed),
            EventType::TaskExpired => bump(&mut self.expired),
            EventType::TaskCancelled => bump(&mut self.cancelled),
            EventType::Custom(_) => {}
        }

        if let Some(message) = &event.error_message {
            bump(self.errors_by_type.entry(message.clone()).or_default());
        }
    }

    // Running mean. Finite for any finite inputs.
    #[allow(clippy::cast_precision_loss)]
    fn observe_duration(&mut self, duration: f64) {
        bump(&mut self.duration_count);
        let n = self.duration_count as f64;
        self.duration_mean = self.duration_mean - self.duration_mean / n + duration / n;
    }

    fn note_execution(&mut self, timestamp: DateTime<Utc>) {
        if self.last_execution_time.is_none_or(|last| timestamp > last) {
            self.last_execution_time = Some(timestamp);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(self) -> StatisticsReport {
        let success_rate = if self.executed == 0 {
            0.0
        } else {
            (self.completed_successfully as f64 / self.executed as f64).clamp(0.0, 1.0)
        };
        let average_execution_time = if self.duration_count == 0 {
            0.0
        } else {
            self.duration_mean
        };

        StatisticsReport {
            total_scheduled: self.scheduled,
            total_executed: self.executed,
            total_completed: self.completed,
            total_failed: self.failed,
            total_expired: self.expired,
            total_cancelled: self.cancelled,
            success_rate,
            average_execution_time,
            executions_by_hour: self.executions_by_hour,
            errors_by_type: self.errors_by_type,
            last_execution_time: self.last_execution_time,
            generated_at: Utc::now(),
        }
    }
}

fn bump(counter: &mut u64) {
    *counter = counter.saturating_add(1);
}
