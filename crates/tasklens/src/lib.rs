//! # tasklens
//!
//! A bounded, concurrently accessed store for background task telemetry.
//!
//! Producers append [`TaskEvent`]s into a fixed-capacity window that evicts
//! its oldest event when full. Consumers read ordered snapshots, filter them
//! and derive statistics. An access pattern monitor times every store
//! operation so the store's own cost shows up in performance reports.
//!
//! # Architecture
//!
//! This crate wires together the workspace microcrates:
//!
//! - `tasklens-buffer`: ring buffer and mutex-guarded store
//! - `tasklens-events`: the event model
//! - `tasklens-monitor`: operation timing and performance reports
//! - `tasklens-stats`: pure aggregation over events
//! - `tasklens-errors`: the shared error taxonomy
//!
//! and adds:
//!
//! - [`config`]: [`TelemetryConfig`], loaded from JSON
//! - [`context`]: [`TelemetryContext`], the shared handle
//! - [`export`]: [`TelemetryExport`], a JSON snapshot for dashboards
//! - [`logging`]: subscriber setup for binaries
//!
//! There is no global state. Build one context at startup and clone it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use tasklens::prelude::*;
//!
//! let context = TelemetryContext::new(TelemetryConfig::builder().event_capacity(100).build()?)?;
//!
//! let producers: Vec<_> = (0..4)
//!     .map(|i| {
//!         let context = context.clone();
//!         thread::spawn(move || {
//!             context.record_event(TaskEvent::execution_started(format!("task-{i}")));
//!         })
//!     })
//!     .collect();
//! for producer in producers {
//!     producer.join().map_err(|_| "producer panicked")?;
//! }
//!
//! assert_eq!(context.buffer_statistics().current_count, 4);
//! assert_eq!(context.generate_statistics(None).total_executed, 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs,
    missing_debug_implementations
)]
#![warn(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod context;
pub mod export;
pub mod logging;
pub mod prelude;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use context::{TelemetryContext, operations};
pub use export::TelemetryExport;
pub use logging::{LoggingConfig, init_logging};

pub use tasklens_buffer::{BufferStatistics, CounterSnapshot, RingBuffer, SynchronizedStore};
pub use tasklens_errors::{ConfigError, SnapshotError, TelemetryError};
pub use tasklens_events::{EnvironmentInfo, EventType, MetadataValue, TaskEvent};
pub use tasklens_monitor::{AccessPatternMonitor, MonitorConfig, OperationStats, PerformanceReport};
pub use tasklens_stats::{DateRange, StatisticsReport, TaskPerformanceMetrics};
