//! Mood estimation from frame brightness
//!
//! Brightness is the arithmetic mean of the whole sample vector, computed
//! here so callers don't have to agree on the definition. Strictly above
//! the smile threshold (default 150) reads as a smile.

use crate::{
    errors::{ClassifyError, ClassifyResult},
    readings::{Mood, MoodReading},
    time::Timestamp,
};

/// Mean brightness of a sample vector
///
/// Fails on an empty vector or non-finite values rather than producing a
/// meaningless mean.
pub fn mean_brightness(sample: &[f64]) -> ClassifyResult<f64> {
    if sample.is_empty() {
        return Err(ClassifyError::EmptySample);
    }

    let mut sum = 0.0;
    for value in sample {
        if !value.is_finite() {
            return Err(ClassifyError::InvalidValue);
        }
        sum += value;
    }
    Ok(sum / sample.len() as f64)
}

/// Smile detector on mean frame brightness
#[derive(Debug, Clone)]
pub struct MoodEstimator {
    /// Strictly above this brightness is a smile
    smile_threshold: f64,
}

impl Default for MoodEstimator {
    fn default() -> Self {
        Self {
            smile_threshold: 150.0,
        }
    }
}

impl MoodEstimator {
    /// Create estimator with a custom smile threshold
    pub fn new_with_threshold(smile_threshold: f64) -> Self {
        Self { smile_threshold }
    }

    /// Classify a brightness value computed at `now`
    pub fn estimate(&self, brightness: f64, now: Timestamp) -> ClassifyResult<MoodReading> {
        if !brightness.is_finite() {
            return Err(ClassifyError::InvalidValue);
        }

        let status = if brightness > self.smile_threshold {
            Mood::Smile
        } else {
            Mood::Neutral
        };

        Ok(MoodReading {
            brightness,
            status,
            timestamp: now,
        })
    }

    /// Estimate mood directly from a sample vector
    pub fn estimate_from_sample(&self, sample: &[f64], now: Timestamp) -> ClassifyResult<MoodReading> {
        self.estimate(mean_brightness(sample)?, now)
    }
}
