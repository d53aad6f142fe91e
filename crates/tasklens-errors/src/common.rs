//! Common error types shared across all tasklens crates.
//!
//! This module provides the top-level error enum that wraps every sub-error,
//! along with error classification and severity levels.

use core::fmt;

use crate::{ConfigError, SnapshotError};

/// Top-level error type that can wrap all tasklens sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot rebuild errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// JSON encode/decode errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl TelemetryError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            TelemetryError::Config(_) => ErrorCategory::Config,
            TelemetryError::Snapshot(_) => ErrorCategory::Snapshot,
            TelemetryError::Serialization(_) => ErrorCategory::Serialization,
            TelemetryError::Io(_) => ErrorCategory::IO,
            TelemetryError::Logging(_) => ErrorCategory::Logging,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TelemetryError::Config(e) => e.severity(),
            TelemetryError::Snapshot(e) => e.severity(),
            TelemetryError::Serialization(_) => ErrorSeverity::Error,
            TelemetryError::Io(_) => ErrorSeverity::Error,
            TelemetryError::Logging(_) => ErrorSeverity::Warning,
        }
    }

    /// Create a logging error.
    pub fn logging(reason: impl Into<String>) -> Self {
        TelemetryError::Logging(reason.into())
    }

    /// Check if this error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Configuration errors
    Config = 0,
    /// Snapshot rebuild errors
    Snapshot = 1,
    /// Serialization errors
    Serialization = 2,
    /// I/O errors
    IO = 3,
    /// Logging setup errors
    Logging = 4,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Snapshot => write!(f, "Snapshot"),
            ErrorCategory::Serialization => write!(f, "Serialization"),
            ErrorCategory::IO => write!(f, "IO"),
            ErrorCategory::Logging => write!(f, "Logging"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, system may be in unstable state
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Config.to_string(), "Config");
        assert_eq!(ErrorCategory::IO.to_string(), "IO");
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
    }

    #[test]
    fn test_telemetry_error_category() {
        let err: TelemetryError = ConfigError::capacity_too_small("capacity", 0).into();
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.is_recoverable());

        let err: TelemetryError = SnapshotError::exceeds_capacity(1, 2).into();
        assert_eq!(err.category(), ErrorCategory::Snapshot);
    }

    #[test]
    fn test_serde_error_converts() {
        let parsed: std::result::Result<u32, serde_json::Error> = serde_json::from_str("nope");
        let err = match parsed {
            Ok(_) => return,
            Err(e) => TelemetryError::from(e),
        };
        assert_eq!(err.category(), ErrorCategory::Serialization);
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_logging_error_is_recoverable() {
        let err = TelemetryError::logging("subscriber already set");
        assert_eq!(err.category(), ErrorCategory::Logging);
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_telemetry_error_is_std_error() {
        let err: TelemetryError = ConfigError::parse("bad").into();
        let _: &dyn std::error::Error = &err;
    }
}
