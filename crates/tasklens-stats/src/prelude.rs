//! Prelude for tasklens-stats.

pub use crate::aggregator::{
    generate_statistics, generate_statistics_in, task_performance_metrics,
    task_performance_metrics_in,
};
pub use crate::range::DateRange;
pub use crate::report::{StatisticsReport, TaskPerformanceMetrics};
