//! Monitor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tasklens_errors::{ConfigError, ConfigResult};

/// Configuration for an [`AccessPatternMonitor`](crate::AccessPatternMonitor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Samples retained per operation name. Older samples are evicted.
    pub history_capacity: usize,
    /// Calls strictly slower than this many seconds count as slow.
    pub slow_threshold_secs: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 1000,
            slow_threshold_secs: 0.1,
        }
    }
}

impl MonitorConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `history_capacity` is zero or the slow threshold
    /// is not a positive, finite number of seconds.
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_capacity("history_capacity", self.history_capacity)?;
        if !self.slow_threshold_secs.is_finite() || self.slow_threshold_secs <= 0.0 {
            return Err(ConfigError::invalid_duration("slow_threshold_secs"));
        }
        Ok(())
    }

    /// Slow threshold as a [`Duration`].
    #[must_use]
    pub fn slow_threshold(&self) -> Duration {
        Duration::try_from_secs_f64(self.slow_threshold_secs).unwrap_or(Duration::ZERO)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }
}

/// Builder for `MonitorConfig`.
#[derive(Debug, Default)]
pub struct MonitorConfigBuilder {
    config: MonitorConfig,
}

impl MonitorConfigBuilder {
    /// Set the per-operation history capacity.
    #[must_use]
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Set the slow-call threshold.
    #[must_use]
    pub fn slow_threshold(mut self, threshold: Duration) -> Self {
        self.config.slow_threshold_secs = threshold.as_secs_f64();
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> ConfigResult<MonitorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slow_threshold(), Duration::from_millis(100));
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = MonitorConfig::builder().history_capacity(0).build();
        assert!(matches!(result, Err(ConfigError::CapacityTooSmall { .. })));
    }

    #[test]
    fn test_builder_rejects_zero_threshold() {
        let result = MonitorConfig::builder().slow_threshold(Duration::ZERO).build();
        assert!(matches!(result, Err(ConfigError::InvalidDuration { .. })));
    }

    #[test]
    fn test_validate_rejects_nan_threshold() {
        let config = MonitorConfig {
            slow_threshold_secs: f64::NAN,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() -> Result<(), serde_json::Error> {
        let config: MonitorConfig = serde_json::from_str(r#"{"history_capacity": 50}"#)?;
        assert_eq!(config.history_capacity, 50);
        assert!((config.slow_threshold_secs - 0.1).abs() < f64::EPSILON);
        Ok(())
    }
}
