//! Structured logging setup.
//!
//! Library code only emits `tracing` events. Binaries embedding the store call
//! [`init_logging`] once at startup to install a subscriber. `RUST_LOG`
//! overrides the configured level when set.

use tasklens_errors::{Result, TelemetryError};
use tracing::{Level, info};

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset.
    pub level: Level,
    /// Emit newline-delimited JSON instead of human-readable lines.
    pub json_format: bool,
    /// Include thread ids and names on each line.
    pub include_thread_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            include_thread_info: true,
        }
    }
}

/// Install a global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::Logging`] if a global subscriber is already set.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let fmt_layer = if config.json_format {
        fmt::layer().json().with_current_span(false).boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(config.include_thread_info)
            .with_thread_names(config.include_thread_info)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::logging(e.to_string()))?;

    info!(
        level = %config.level,
        json = config.json_format,
        "structured logging initialized"
    );
    Ok(())
}
