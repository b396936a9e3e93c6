//! Core classification engine for CradleSense
//!
//! Turns periodic device samples (a camera-brightness vector, a temperature
//! reading) into discrete events: gestures, mood, and health status.
//!
//! Key constraints:
//! - Classification is a pure, deterministic function of its inputs
//! - The gesture baseline is caller-owned state, threaded explicitly
//! - No I/O anywhere in this crate
//!
//! ```
//! use cradlesense_core::{GestureClassifier, GestureKind, zero_baseline};
//!
//! let classifier = GestureClassifier::default();
//! let baseline = zero_baseline();
//! let sample = vec![0.0; 1000];
//!
//! let result = classifier.classify(&sample, &baseline).unwrap();
//! assert_eq!(result.kind, GestureKind::None);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod allocator;
pub mod classifiers;
pub mod errors;
pub mod readings;
pub mod time;

// Public API
pub use errors::{ClassifyError, ClassifyResult};
pub use readings::{
    Classification, GestureKind, HealthReading, HealthStatus, Mood, MoodReading, RegionDeltas,
};
pub use classifiers::{
    gesture::{zero_baseline, GestureClassifier, QUADRANT, WINDOW},
    emotion::{mean_brightness, MoodEstimator},
    temperature::TemperatureMonitor,
};
pub use allocator::{Allocator, Assignee, Assignment, CoinFlipAllocator, RoundRobinAllocator};

/// Crate version, for diagnostics
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
