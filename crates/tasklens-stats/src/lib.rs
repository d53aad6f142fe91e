//! # tasklens-stats
//!
//! Pure statistics over task event sequences.
//!
//! # Architecture
//!
//! - [`aggregator`]: [`generate_statistics`] and [`task_performance_metrics`],
//!   plus `_in` variants taking an explicit time zone for hour buckets
//! - [`report`]: [`StatisticsReport`] and [`TaskPerformanceMetrics`]
//! - [`range`]: [`DateRange`], an inclusive UTC window
//!
//! Nothing in this crate fails. Empty input yields a zero-valued report and
//! an unknown task identifier yields `None`.
//!
//! Report maps are `BTreeMap`s, so two reports over the same input
//! serialize identically except for `generated_at`.

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs,
    missing_debug_implementations
)]
#![warn(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aggregator;
pub mod prelude;
pub mod range;
pub mod report;

pub use aggregator::{
    all_task_metrics_in, generate_statistics, generate_statistics_in, task_identifiers,
    task_performance_metrics, task_performance_metrics_in,
};
pub use range::DateRange;
pub use report::{StatisticsReport, TaskPerformanceMetrics};
