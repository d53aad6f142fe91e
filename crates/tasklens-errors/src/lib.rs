//! Centralized error types for tasklens
//!
//! Every tasklens crate reports failures through the types in this crate so
//! callers can match on one taxonomy regardless of which layer failed.
//!
//! # Architecture
//!
//! - [`config`]: invalid capacities and thresholds, rejected at the call site
//! - [`snapshot`]: exported buffer snapshots that cannot be rebuilt
//! - [`common`]: the top-level [`TelemetryError`] plus category and severity
//!
//! Statistics over empty input and lookups of unknown task identifiers are
//! *not* errors; those operations are total and return zero-valued or absent
//! results instead.
//!
//! # Example
//!
//! ```
//! use tasklens_errors::prelude::*;
//!
//! fn checked_capacity(capacity: usize) -> Result<usize> {
//!     if capacity == 0 {
//!         return Err(ConfigError::capacity_too_small("capacity", capacity).into());
//!     }
//!     Ok(capacity)
//! }
//!
//! assert!(checked_capacity(0).is_err());
//! assert_eq!(checked_capacity(8).ok(), Some(8));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod prelude;
pub mod snapshot;

pub use common::{ErrorCategory, ErrorSeverity, TelemetryError};
pub use config::ConfigError;
pub use snapshot::SnapshotError;

/// A specialized `Result` type for tasklens operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// A specialized `Result` type for operations that only fail on bad configuration.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
