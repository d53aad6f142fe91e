//! Property-based tests for error classification.

use proptest::prelude::*;
use tasklens_errors::{ConfigError, ErrorCategory, ErrorSeverity, TelemetryError};

proptest! {
    #[test]
    fn test_check_capacity_accepts_positive(capacity in 1usize..1_000_000) {
        prop_assert_eq!(ConfigError::check_capacity("capacity", capacity), Ok(capacity));
    }

    #[test]
    fn test_capacity_message_names_field(field in "[a-z_.]{1,24}") {
        let err = ConfigError::capacity_too_small(field.clone(), 0);
        prop_assert!(err.to_string().contains(&field));
    }

    #[test]
    fn test_parse_errors_classified_as_config(reason in ".*") {
        let err: TelemetryError = ConfigError::parse(reason).into();
        prop_assert_eq!(err.category(), ErrorCategory::Config);
        prop_assert_eq!(err.severity(), ErrorSeverity::Error);
    }
}
