//! Temperature monitor for fever detection
//!
//! A reading strictly above the fever threshold (default 38.0 °C) is
//! Abnormal; exactly 38.0 °C is Normal. NaN and infinite readings are
//! rejected rather than silently classified Normal.

use crate::{
    errors::{ClassifyError, ClassifyResult},
    readings::{HealthReading, HealthStatus},
    time::Timestamp,
};

/// Fever detector on a single Celsius reading
#[derive(Debug, Clone)]
pub struct TemperatureMonitor {
    /// Strictly above this is a fever
    fever_threshold: f64,
}

impl Default for TemperatureMonitor {
    fn default() -> Self {
        Self {
            fever_threshold: 38.0,
        }
    }
}

impl TemperatureMonitor {
    /// Create monitor with a custom fever threshold
    pub fn new_with_threshold(fever_threshold: f64) -> Self {
        Self { fever_threshold }
    }

    /// Classify a temperature reading taken at `now`
    pub fn check(&self, temperature: f64, now: Timestamp) -> ClassifyResult<HealthReading> {
        if !temperature.is_finite() {
            return Err(ClassifyError::InvalidValue);
        }

        let status = if temperature > self.fever_threshold {
            HealthStatus::Abnormal
        } else {
            HealthStatus::Normal
        };

        Ok(HealthReading {
            temperature,
            status,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        let monitor = TemperatureMonitor::default();
        assert_eq!(monitor.check(38.0, 0).unwrap().status, HealthStatus::Normal);
        assert_eq!(
            monitor.check(38.01, 0).unwrap().status,
            HealthStatus::Abnormal
        );
    }

    #[test]
    fn normal_range() {
        let monitor = TemperatureMonitor::default();
        let reading = monitor.check(36.5, 1234).unwrap();
        assert_eq!(reading.status, HealthStatus::Normal);
        assert_eq!(reading.temperature, 36.5);
        assert_eq!(reading.timestamp, 1234);
    }

    #[test]
    fn nan_and_infinity_rejected() {
        let monitor = TemperatureMonitor::default();
        assert_eq!(monitor.check(f64::NAN, 0), Err(ClassifyError::InvalidValue));
        assert_eq!(
            monitor.check(f64::INFINITY, 0),
            Err(ClassifyError::InvalidValue)
        );
    }

    #[test]
    fn custom_threshold() {
        let monitor = TemperatureMonitor::new_with_threshold(37.5);
        assert_eq!(
            monitor.check(37.6, 0).unwrap().status,
            HealthStatus::Abnormal
        );
    }
}
