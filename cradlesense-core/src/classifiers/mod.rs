//! Threshold classifiers for device samples
//!
//! ## Overview
//!
//! Three classifiers turn raw numeric samples into discrete events:
//!
//! - [`gesture::GestureClassifier`]: frame-difference analysis of a
//!   brightness vector against a caller-owned baseline
//! - [`temperature::TemperatureMonitor`]: fever detection on a single
//!   temperature reading
//! - [`emotion::MoodEstimator`]: smile detection on mean frame brightness
//!
//! ## Design
//!
//! Every classifier is a pure function of its inputs plus its configured
//! thresholds. There is no hidden state: the gesture baseline is passed in
//! explicitly and the caller decides when to replace it. All thresholds
//! are strict greater-than comparisons, and the gesture decision rules are
//! evaluated first-match-wins in a fixed priority order: a sample that
//! satisfies both the wave and pointing rules is a wave.
//!
//! Malformed input (undersized window, empty vector, NaN) is rejected with
//! [`ClassifyError`](crate::errors::ClassifyError) rather than silently
//! truncated or misclassified.

pub mod emotion;
pub mod gesture;
pub mod temperature;

pub use emotion::MoodEstimator;
pub use gesture::GestureClassifier;
pub use temperature::TemperatureMonitor;
