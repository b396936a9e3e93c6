//! Engine configuration
//!
//! Deserializable so deployments can load it from a JSON file; every
//! field has a default matching the reference hardware.

use std::time::Duration;

use serde::Deserialize;

/// Deployment configuration for one engine instance
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Companion device base address
    pub hardware_base_url: String,

    /// Per-command actuator timeout in milliseconds
    pub actuator_timeout_ms: u64,

    /// Fever threshold in degrees Celsius (strict greater-than)
    pub fever_threshold: f64,

    /// Smile brightness threshold (strict greater-than)
    pub smile_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hardware_base_url: "http://raspberry-pi:8080/api".to_string(),
            actuator_timeout_ms: 2000,
            fever_threshold: 38.0,
            smile_threshold: 150.0,
        }
    }
}

impl EngineConfig {
    /// Actuator timeout as a [`Duration`]
    pub fn actuator_timeout(&self) -> Duration {
        Duration::from_millis(self.actuator_timeout_ms)
    }
}
