//! Snapshot tests for error message formatting.
//!
//! Error text is shown to operators by the presentation layer, so it is
//! pinned here.

use insta::assert_snapshot;
use tasklens_errors::{ConfigError, SnapshotError, TelemetryError};

#[test]
fn test_capacity_too_small() {
    assert_snapshot!(
        ConfigError::capacity_too_small("capacity", 0).to_string(),
        @"capacity must be at least 1, got 0"
    );
}

#[test]
fn test_invalid_duration() {
    assert_snapshot!(
        ConfigError::invalid_duration("monitor.slow_threshold").to_string(),
        @"monitor.slow_threshold must be a positive, finite duration"
    );
}

#[test]
fn test_wrapped_config_error() {
    let err: TelemetryError = ConfigError::capacity_too_small("new_capacity", 0).into();
    assert_snapshot!(
        err.to_string(),
        @"Configuration error: new_capacity must be at least 1, got 0"
    );
}

#[test]
fn test_wrapped_snapshot_error() {
    let err: TelemetryError = SnapshotError::exceeds_capacity(4, 9).into();
    assert_snapshot!(
        err.to_string(),
        @"Snapshot error: snapshot holds 9 elements but its capacity is 4"
    );
}
