//! # tasklens-events
//!
//! Value types for task lifecycle telemetry.
//!
//! # Architecture
//!
//! - [`event`]: [`TaskEvent`] and its lifecycle tag [`EventType`]
//! - [`metadata`]: the closed [`MetadataValue`] set for per-event metadata
//! - [`environment`]: [`EnvironmentInfo`], a host snapshot taken via `sysinfo`
//!
//! Events are plain data. They are opaque to the ring buffer that stores
//! them; only the statistics aggregator looks inside.
//!
//! # Example
//!
//! ```rust
//! use tasklens_events::prelude::*;
//!
//! let events = vec![
//!     TaskEvent::scheduled("refresh"),
//!     TaskEvent::execution_started("refresh"),
//!     TaskEvent::execution_completed("refresh", 0.8, true),
//! ];
//! assert!(events.iter().all(|e| e.task_identifier == "refresh"));
//! assert!(events[2].event_type.is_terminal());
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs,
    missing_debug_implementations
)]
#![warn(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod environment;
pub mod event;
pub mod metadata;
pub mod prelude;

pub use environment::{
    BatteryState, DeviceInfo, EnvironmentInfo, PowerState, SystemState, ThermalState,
};
pub use event::{EventType, TaskEvent};
pub use metadata::{Metadata, MetadataValue};
