//! Prelude for tasklens.
//!
//! ```rust
//! use tasklens::prelude::*;
//!
//! let context = TelemetryContext::new(TelemetryConfig::default())?;
//! context.record_event(TaskEvent::failed("import", "bad header"));
//! let stats = context.generate_statistics(None);
//! assert_eq!(stats.errors_by_type.get("bad header"), Some(&1));
//! # Ok::<(), ConfigError>(())
//! ```

pub use crate::config::TelemetryConfig;
pub use crate::context::TelemetryContext;
pub use crate::export::TelemetryExport;
pub use crate::logging::{LoggingConfig, init_logging};

pub use tasklens_buffer::{BufferStatistics, RingBuffer};
pub use tasklens_errors::{ConfigError, TelemetryError};
pub use tasklens_events::{EnvironmentInfo, EventType, MetadataValue, TaskEvent};
pub use tasklens_monitor::{MonitorConfig, PerformanceReport};
pub use tasklens_stats::{DateRange, StatisticsReport, TaskPerformanceMetrics};
