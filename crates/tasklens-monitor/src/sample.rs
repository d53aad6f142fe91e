//! Recorded access samples.

use serde::{Deserialize, Serialize};

/// One timed call to a named operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessSample {
    /// Wall time of the call in seconds.
    pub duration_secs: f64,
    /// The call completed without error.
    pub success: bool,
}

impl AccessSample {
    /// Create a sample.
    #[must_use]
    pub fn new(duration_secs: f64, success: bool) -> Self {
        Self {
            duration_secs,
            success,
        }
    }

    /// Strictly slower than `threshold_secs`.
    #[must_use]
    pub fn is_slow(&self, threshold_secs: f64) -> bool {
        self.duration_secs > threshold_secs
    }
}
