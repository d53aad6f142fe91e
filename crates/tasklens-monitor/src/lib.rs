//! # tasklens-monitor
//!
//! Access pattern monitoring: named operation timings, aggregated into
//! performance reports.
//!
//! The monitor observes *operations*, not stored data. It has no view of
//! what any store holds, and nothing a store evicts affects its numbers.
//!
//! # Architecture
//!
//! - [`config`]: [`MonitorConfig`], history capacity and slow threshold
//! - [`sample`]: [`AccessSample`], one timed call
//! - [`monitor`]: [`AccessPatternMonitor`], one bounded store per operation
//! - [`report`]: [`PerformanceReport`] and [`OperationStats`]
//!
//! Monitors are explicit handles. Construct one at startup and share it
//! through an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tasklens_monitor::prelude::*;
//!
//! let monitor = Arc::new(AccessPatternMonitor::default());
//! let parsed: Result<u32, std::num::ParseIntError> =
//!     monitor.time("config.parse", || "42".parse());
//! assert_eq!(parsed.ok(), Some(42));
//!
//! let report = monitor.performance_report();
//! assert_eq!(report.total_operations, 1);
//! assert_eq!(report.failed_operations, 0);
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
pub mod monitor;
pub mod prelude;
pub mod report;
pub mod sample;

pub use config::{MonitorConfig, MonitorConfigBuilder};
pub use monitor::AccessPatternMonitor;
pub use report::{OperationStats, PerformanceReport};
pub use sample::AccessSample;
