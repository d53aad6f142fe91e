//! Host environment captured alongside an event.
//!
//! [`EnvironmentInfo::capture`] samples the host through `sysinfo`. Battery
//! and thermal state have no portable source, so they start as `Unknown` and
//! producers that know better fill them in.

use serde::{Deserialize, Serialize};
use sysinfo::System;

const UNKNOWN: &str = "Unknown";

/// Snapshot of device, system and power state at event capture time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    /// Static description of the host.
    pub device: DeviceInfo,
    /// Resource usage at capture time.
    pub system: SystemState,
    /// Power source and battery state.
    pub power: PowerState,
}

impl EnvironmentInfo {
    /// Sample the current host.
    ///
    /// Builds a fresh `sysinfo::System`; this is not free, so producers that
    /// emit many events should capture once and clone.
    #[must_use]
    pub fn capture() -> Self {
        let system = System::new_all();
        Self::from_system(&system)
    }

    /// Build from an already refreshed `sysinfo::System`.
    #[must_use]
    pub fn from_system(system: &System) -> Self {
        let device = DeviceInfo {
            host_name: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            os_name: System::name().unwrap_or_else(|| UNKNOWN.to_string()),
            os_version: System::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            cpu_count: system.cpus().len(),
        };

        let system = SystemState {
            total_memory_bytes: system.total_memory(),
            used_memory_bytes: system.used_memory(),
            uptime_secs: System::uptime(),
            thermal_state: ThermalState::Unknown,
        };

        Self {
            device,
            system,
            power: PowerState::default(),
        }
    }
}

/// Static host description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Network host name.
    pub host_name: String,
    /// Operating system name.
    pub os_name: String,
    /// Operating system version.
    pub os_version: String,
    /// Logical CPU count.
    pub cpu_count: usize,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            host_name: UNKNOWN.to_string(),
            os_name: UNKNOWN.to_string(),
            os_version: UNKNOWN.to_string(),
            cpu_count: 0,
        }
    }
}

/// Resource usage at capture time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemState {
    /// Installed memory.
    pub total_memory_bytes: u64,
    /// Memory in use.
    pub used_memory_bytes: u64,
    /// Seconds since boot.
    pub uptime_secs: u64,
    /// Thermal pressure.
    pub thermal_state: ThermalState,
}

impl SystemState {
    /// Used memory as a percentage of total, `0.0` when total is unknown.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn memory_usage_percent(&self) -> f64 {
        if self.total_memory_bytes == 0 {
            return 0.0;
        }
        (self.used_memory_bytes as f64 / self.total_memory_bytes as f64) * 100.0
    }
}

/// Thermal pressure levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalState {
    /// Not reported.
    #[default]
    Unknown,
    /// No throttling.
    Nominal,
    /// Slightly elevated.
    Fair,
    /// Performance is reduced.
    Serious,
    /// Severe throttling.
    Critical,
}

/// Battery charge state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryState {
    /// Not reported, or no battery.
    #[default]
    Unknown,
    /// Running on battery.
    Unplugged,
    /// On external power, charging.
    Charging,
    /// On external power, fully charged.
    Full,
}

/// Power source and battery state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerState {
    /// Charge level in `0.0..=1.0`, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f32>,
    /// Charge state.
    pub battery_state: BatteryState,
    /// Reduced-power mode is active.
    pub low_power_mode: bool,
}

impl PowerState {
    /// Record a battery reading. The level is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_battery(mut self, level: f32, state: BatteryState) -> Self {
        self.battery_level = Some(level.clamp(0.0, 1.0));
        self.battery_state = state;
        self
    }
}
