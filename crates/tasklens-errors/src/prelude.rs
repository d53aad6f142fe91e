//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use tasklens_errors::prelude::*;
//!
//! fn load() -> Result<()> {
//!     Err(ConfigError::parse("unexpected end of input").into())
//! }
//!
//! assert!(load().is_err());
//! ```

pub use crate::{
    ConfigResult, Result,
    common::{ErrorCategory, ErrorSeverity, TelemetryError},
    config::ConfigError,
    snapshot::SnapshotError,
};
