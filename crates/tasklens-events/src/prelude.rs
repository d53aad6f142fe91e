//! Prelude for tasklens-events.

pub use crate::environment::{BatteryState, EnvironmentInfo, PowerState, ThermalState};
pub use crate::event::{EventType, TaskEvent};
pub use crate::metadata::{Metadata, MetadataValue};
