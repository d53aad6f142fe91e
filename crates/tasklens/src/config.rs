//! Telemetry configuration.
//!
//! Loaded from JSON. Missing fields take their defaults, so `{}` is a valid
//! configuration document.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tasklens_buffer::DEFAULT_CAPACITY;
use tasklens_errors::{ConfigError, ConfigResult, Result};
use tasklens_monitor::MonitorConfig;

/// Configuration for a [`TelemetryContext`](crate::TelemetryContext).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Events retained by the store.
    pub event_capacity: usize,
    /// Access pattern monitor settings.
    pub monitor: MonitorConfig,
    /// Log every eviction at `debug`.
    pub log_evictions: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_CAPACITY,
            monitor: MonitorConfig::default(),
            log_evictions: false,
        }
    }
}

impl TelemetryConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the event capacity is zero or the monitor
    /// configuration is invalid.
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_capacity("event_capacity", self.event_capacity)?;
        self.monitor.validate()
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON, or a validation
    /// error if a value is out of range.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise the same
    /// errors as [`TelemetryConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&json)?)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::default()
    }
}

/// Builder for `TelemetryConfig`.
#[derive(Debug, Default)]
pub struct TelemetryConfigBuilder {
    config: TelemetryConfig,
}

impl TelemetryConfigBuilder {
    /// Set the event store capacity.
    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity;
        self
    }

    /// Set the monitor configuration.
    #[must_use]
    pub fn monitor(mut self, monitor: MonitorConfig) -> Self {
        self.config.monitor = monitor;
        self
    }

    /// Enable or disable eviction logging.
    #[must_use]
    pub fn log_evictions(mut self, enabled: bool) -> Self {
        self.config.log_evictions = enabled;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> ConfigResult<TelemetryConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() -> ConfigResult<()> {
        let config = TelemetryConfig::from_json_str("{}")?;
        assert_eq!(config, TelemetryConfig::default());
        assert_eq!(config.event_capacity, 1000);
        Ok(())
    }

    #[test]
    fn test_nested_monitor_settings() -> ConfigResult<()> {
        let config = TelemetryConfig::from_json_str(
            r#"{"event_capacity": 64, "monitor": {"slow_threshold_secs": 0.25}, "log_evictions": true}"#,
        )?;
        assert_eq!(config.event_capacity, 64);
        assert_eq!(config.monitor.history_capacity, 1000);
        assert!((config.monitor.slow_threshold_secs - 0.25).abs() < f64::EPSILON);
        assert!(config.log_evictions);
        Ok(())
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = TelemetryConfig::from_json_str(r#"{"event_capacity": 0}"#);
        assert!(matches!(
            result,
            Err(ConfigError::CapacityTooSmall { ref field, .. }) if field == "event_capacity"
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = TelemetryConfig::from_json_str("{ event_capacity: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_builder_validates_monitor() {
        let monitor = MonitorConfig {
            history_capacity: 0,
            ..MonitorConfig::default()
        };
        assert!(TelemetryConfig::builder().monitor(monitor).build().is_err());
    }
}
