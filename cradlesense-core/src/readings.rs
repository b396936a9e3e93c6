//! Reading and classification result types
//!
//! ## Overview
//!
//! These are the values that flow out of the classifiers and into the
//! actuator dispatcher and the telemetry store. All of them are produced
//! per invocation and never mutated afterwards; the store serializes them
//! with serde before sealing.
//!
//! ## Lifecycle
//!
//! A `Classification`, `HealthReading`, or `MoodReading` lives for exactly
//! one pipeline run: it is produced by a classifier, consumed by the
//! dispatcher for its side effect, and appended (encrypted) to the user's
//! history. Nothing in this crate retains it.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Gesture classification outcome
///
/// Maps to a fixed set of actuator responses; see the actuator policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// No significant motion
    None,
    /// Lateral motion concentrated on one side
    Wave,
    /// Strong full-frame motion
    Clap,
    /// Moderate motion concentrated in one quadrant
    Pointing,
    /// Motion beyond any plausible gesture - safety signal
    Abnormal,
}

impl GestureKind {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            GestureKind::None => "none",
            GestureKind::Wave => "wave",
            GestureKind::Clap => "clap",
            GestureKind::Pointing => "pointing",
            GestureKind::Abnormal => "abnormal",
        }
    }
}

/// Per-quadrant normalized mean absolute differences
///
/// The four quadrants partition the 1000-element analysis window exactly:
/// `[0,250)`, `[250,500)`, `[500,750)`, `[750,1000)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionDeltas {
    /// Mean absolute difference over indices `[0, 250)`
    pub left_top: f64,
    /// Mean absolute difference over indices `[250, 500)`
    pub right_top: f64,
    /// Mean absolute difference over indices `[500, 750)`
    pub left_bottom: f64,
    /// Mean absolute difference over indices `[750, 1000)`
    pub right_bottom: f64,
}

impl RegionDeltas {
    /// Largest of the four quadrant deltas
    pub fn max(&self) -> f64 {
        self.left_top
            .max(self.right_top)
            .max(self.left_bottom)
            .max(self.right_bottom)
    }
}

/// Result of one gesture classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Classified gesture
    pub kind: GestureKind,
    /// Mean absolute difference over the whole analysis window
    pub motion: f64,
    /// Per-quadrant deltas used by the decision rules
    pub regions: RegionDeltas,
}

/// Health status from a temperature reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Temperature within the normal range
    Normal,
    /// Fever threshold exceeded
    Abnormal,
}

impl HealthStatus {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "normal",
            HealthStatus::Abnormal => "abnormal",
        }
    }
}

/// A classified temperature reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthReading {
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Classified status
    pub status: HealthStatus,
    /// When the reading was classified (epoch ms)
    pub timestamp: Timestamp,
}

/// Estimated mood from frame brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Bright frame - smiling
    Smile,
    /// Everything else
    Neutral,
}

/// A classified mood reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodReading {
    /// Mean brightness of the sample vector
    pub brightness: f64,
    /// Estimated mood
    pub status: Mood,
    /// When the reading was classified (epoch ms)
    pub timestamp: Timestamp,
}
