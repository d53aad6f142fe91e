//! Prelude for tasklens-monitor.

pub use crate::config::MonitorConfig;
pub use crate::monitor::AccessPatternMonitor;
pub use crate::report::{OperationStats, PerformanceReport};
pub use crate::sample::AccessSample;
