//! Exported telemetry snapshots.
//!
//! A [`TelemetryExport`] is the artifact handed to dashboards and sync
//! collaborators. Its JSON form round-trips field for field: counts stay
//! integers, rates stay fractions in `0.0..=1.0`, durations stay seconds.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklens_buffer::{BufferStatistics, RingBuffer};
use tasklens_errors::Result;
use tasklens_events::TaskEvent;
use tasklens_monitor::PerformanceReport;
use tasklens_stats::StatisticsReport;

/// Point-in-time export of a telemetry context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryExport {
    /// When the export was taken.
    pub exported_at: DateTime<Utc>,
    /// The event store contents and capacity.
    pub buffer: RingBuffer<TaskEvent>,
    /// Store occupancy at export time.
    pub buffer_statistics: BufferStatistics,
    /// Statistics over every exported event.
    pub statistics: StatisticsReport,
    /// Operation timings at export time.
    pub performance: PerformanceReport,
}

impl TelemetryExport {
    /// Assemble an export stamped now.
    #[must_use]
    pub fn new(
        buffer: RingBuffer<TaskEvent>,
        buffer_statistics: BufferStatistics,
        statistics: StatisticsReport,
        performance: PerformanceReport,
    ) -> Self {
        Self {
            exported_at: Utc::now(),
            buffer,
            buffer_statistics,
            statistics,
            performance,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON, validating the buffer snapshot.
    ///
    /// # Errors
    ///
    /// Returns a serialization error on malformed JSON or a buffer snapshot
    /// holding more events than its capacity.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write pretty JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read an export written by [`TelemetryExport::write_to`].
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// True when the recorded occupancy matches the exported buffer.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.buffer_statistics == self.buffer.statistics()
    }
}
