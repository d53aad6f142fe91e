//! Configuration error types.
//!
//! Raised synchronously by constructors and resizers when a capacity or
//! threshold is outside its valid domain. Fatal to the call, never to the
//! process.

use crate::common::ErrorSeverity;

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A capacity below its minimum
    #[error("{field} must be at least {min}, got {value}")]
    CapacityTooSmall {
        /// Field or parameter name
        field: String,
        /// The rejected value
        value: usize,
        /// Smallest accepted value
        min: usize,
    },

    /// A duration threshold that is zero, negative or not finite
    #[error("{field} must be a positive, finite duration")]
    InvalidDuration {
        /// Field or parameter name
        field: String,
    },

    /// A configuration document that could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Smallest capacity any buffer accepts.
    pub const MIN_CAPACITY: usize = 1;

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create a capacity error against [`ConfigError::MIN_CAPACITY`].
    pub fn capacity_too_small(field: impl Into<String>, value: usize) -> Self {
        ConfigError::CapacityTooSmall {
            field: field.into(),
            value,
            min: Self::MIN_CAPACITY,
        }
    }

    /// Create an invalid duration error.
    pub fn invalid_duration(field: impl Into<String>) -> Self {
        ConfigError::InvalidDuration {
            field: field.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(reason: impl Into<String>) -> Self {
        ConfigError::Parse(reason.into())
    }

    /// Validate a capacity, returning it unchanged when accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityTooSmall`] when `value` is zero.
    pub fn check_capacity(field: &str, value: usize) -> Result<usize, ConfigError> {
        if value < Self::MIN_CAPACITY {
            return Err(Self::capacity_too_small(field, value));
        }
        Ok(value)
    }
}
