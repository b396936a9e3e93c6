//! Frame-difference gesture classifier
//!
//! ## How it works
//!
//! The companion device sends a brightness vector per frame. The classifier
//! compares the first [`WINDOW`] elements of the current sample against the
//! same range of a baseline (normally the previous frame) and computes:
//!
//! - `motion`: mean absolute difference over the whole window
//! - four quadrant deltas, each a mean over one [`QUADRANT`]-element range
//!
//! The quadrants partition the window exactly: `[0,250)`, `[250,500)`,
//! `[500,750)`, `[750,1000)`. The sum of the quadrant deltas times
//! [`QUADRANT`] therefore equals the total absolute difference over the
//! window.
//!
//! ## Decision rules
//!
//! First match wins, strict greater-than at every threshold:
//!
//! 1. `motion > 500` → Abnormal
//! 2. `motion > 200` → Clap
//! 3. `motion > 50` and a left quadrant exceeds its right neighbour → Wave
//! 4. `motion > 30` and any quadrant delta `> 50` → Pointing
//! 5. otherwise → None
//!
//! The ordering is decisive: a sample can satisfy both rule 3 and rule 4,
//! and it is classified as a wave.
//!
//! ## Baseline ownership
//!
//! The baseline is caller-owned state, threaded through every call. The
//! classifier never stores it; the caller replaces it with the current
//! window after a successful run. `zero_baseline()` provides the initial
//! all-zero baseline for a user's first sample.

use log::trace;

use crate::{
    errors::{ClassifyError, ClassifyResult},
    readings::{Classification, GestureKind, RegionDeltas},
};

/// Fixed analysis window: only the first 1000 elements are analysed
pub const WINDOW: usize = 1000;

/// Width of one quadrant region
pub const QUADRANT: usize = 250;

/// Initial all-zero baseline at window width
pub fn zero_baseline() -> Vec<f64> {
    vec![0.0; WINDOW]
}

/// Gesture classifier with configurable motion thresholds
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    /// Motion above this is beyond any plausible gesture
    abnormal_motion: f64,

    /// Motion above this reads as a clap
    clap_motion: f64,

    /// Minimum motion for a wave
    wave_motion: f64,

    /// Minimum motion for pointing
    pointing_motion: f64,

    /// Minimum single-quadrant delta for pointing
    pointing_region: f64,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self {
            abnormal_motion: 500.0,
            clap_motion: 200.0,
            wave_motion: 50.0,
            pointing_motion: 30.0,
            pointing_region: 50.0,
        }
    }
}

impl GestureClassifier {
    /// Create classifier with custom motion thresholds
    ///
    /// Thresholds must descend from abnormal through pointing; out-of-order
    /// values are sorted so the priority rules stay meaningful.
    pub fn new_with_thresholds(
        abnormal: f64,
        clap: f64,
        wave: f64,
        pointing: f64,
        pointing_region: f64,
    ) -> Self {
        let mut levels = [abnormal, clap, wave, pointing];
        levels.sort_by(|a, b| b.total_cmp(a));

        Self {
            abnormal_motion: levels[0],
            clap_motion: levels[1],
            wave_motion: levels[2],
            pointing_motion: levels[3],
            pointing_region: pointing_region.abs(),
        }
    }

    /// Classify a sample against a baseline
    ///
    /// Both vectors must cover the analysis window; anything past index
    /// `WINDOW - 1` is ignored. Pure; the caller persists the new baseline.
    pub fn classify(&self, sample: &[f64], baseline: &[f64]) -> ClassifyResult<Classification> {
        let window = Self::window_of(sample)?;
        let base = Self::window_of(baseline)?;

        let mut quadrants = [0.0f64; 4];
        for (i, (current, previous)) in window.iter().zip(base.iter()).enumerate() {
            if !current.is_finite() || !previous.is_finite() {
                return Err(ClassifyError::InvalidValue);
            }
            quadrants[i / QUADRANT] += (current - previous).abs();
        }

        let motion = quadrants.iter().sum::<f64>() / WINDOW as f64;
        let regions = RegionDeltas {
            left_top: quadrants[0] / QUADRANT as f64,
            right_top: quadrants[1] / QUADRANT as f64,
            left_bottom: quadrants[2] / QUADRANT as f64,
            right_bottom: quadrants[3] / QUADRANT as f64,
        };

        let kind = self.decide(motion, &regions);
        trace!(
            "gesture: kind={} motion={:.3} max_region={:.3}",
            kind.name(),
            motion,
            regions.max()
        );

        Ok(Classification {
            kind,
            motion,
            regions,
        })
    }

    /// First-match-wins decision over the computed deltas
    fn decide(&self, motion: f64, regions: &RegionDeltas) -> GestureKind {
        if motion > self.abnormal_motion {
            return GestureKind::Abnormal;
        }
        if motion > self.clap_motion {
            return GestureKind::Clap;
        }
        if motion > self.wave_motion
            && (regions.left_top > regions.right_top || regions.left_bottom > regions.right_bottom)
        {
            return GestureKind::Wave;
        }
        if motion > self.pointing_motion && regions.max() > self.pointing_region {
            return GestureKind::Pointing;
        }
        GestureKind::None
    }

    fn window_of(values: &[f64]) -> ClassifyResult<&[f64]> {
        if values.len() < WINDOW {
            return Err(ClassifyError::WindowTooShort {
                required: WINDOW,
                available: values.len(),
            });
        }
        Ok(&values[..WINDOW])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample differing from a zero baseline by `delta` over one index range
    fn sample_with(range: core::ops::Range<usize>, delta: f64) -> Vec<f64> {
        let mut sample = vec![0.0; WINDOW];
        for v in &mut sample[range] {
            *v = delta;
        }
        sample
    }

    fn classify(sample: &[f64]) -> Classification {
        GestureClassifier::default()
            .classify(sample, &zero_baseline())
            .unwrap()
    }

    #[test]
    fn still_frame_is_none() {
        let result = classify(&vec![0.0; WINDOW]);
        assert_eq!(result.kind, GestureKind::None);
        assert_eq!(result.motion, 0.0);
    }

    #[test]
    fn abnormal_threshold_is_strict() {
        // Uniform delta of exactly 500: motion == 500, not abnormal.
        // Falls through to the clap rule instead.
        assert_eq!(classify(&vec![500.0; WINDOW]).kind, GestureKind::Clap);
        assert_eq!(classify(&vec![500.0001; WINDOW]).kind, GestureKind::Abnormal);
    }

    #[test]
    fn clap_threshold_is_strict() {
        // motion == 200 exactly: not a clap. Every quadrant delta is 200,
        // which satisfies the pointing rule.
        assert_eq!(classify(&vec![200.0; WINDOW]).kind, GestureKind::Pointing);
        assert_eq!(classify(&vec![200.0001; WINDOW]).kind, GestureKind::Clap);
    }

    #[test]
    fn wave_requires_left_dominance() {
        // Left-top quadrant moves, motion = 300 * 250 / 1000 = 75 > 50
        let result = classify(&sample_with(0..QUADRANT, 300.0));
        assert_eq!(result.kind, GestureKind::Wave);
        assert_eq!(result.motion, 75.0);
        assert_eq!(result.regions.left_top, 300.0);
        assert_eq!(result.regions.right_top, 0.0);

        // Same motion concentrated on the right: no left dominance, and the
        // pointing rule picks it up instead.
        let result = classify(&sample_with(QUADRANT..2 * QUADRANT, 300.0));
        assert_eq!(result.kind, GestureKind::Pointing);
    }

    #[test]
    fn wave_wins_over_pointing() {
        // Rule 3 and rule 4 both match here; priority order makes it a wave.
        let result = classify(&sample_with(0..QUADRANT, 300.0));
        assert!(result.motion > 50.0 && result.regions.max() > 50.0);
        assert_eq!(result.kind, GestureKind::Wave);
    }

    #[test]
    fn wave_motion_floor_is_strict() {
        // Left-top delta of 200 puts motion at exactly 50: not a wave even
        // with full left dominance. The pointing rule still matches
        // (motion 50 > 30, region 200 > 50).
        let result = classify(&sample_with(0..QUADRANT, 200.0));
        assert_eq!(result.motion, 50.0);
        assert!(result.regions.left_top > result.regions.right_top);
        assert_eq!(result.kind, GestureKind::Pointing);
    }

    #[test]
    fn pointing_region_floor_is_strict() {
        // Uniform 50: motion 50 clears the pointing motion floor, but every
        // region delta sits at exactly 50, so nothing matches.
        let result = classify(&vec![50.0; WINDOW]);
        assert_eq!(result.motion, 50.0);
        assert_eq!(result.regions.max(), 50.0);
        assert_eq!(result.kind, GestureKind::None);
    }

    #[test]
    fn lower_left_dominance_also_waves() {
        let result = classify(&sample_with(2 * QUADRANT..3 * QUADRANT, 260.0));
        assert_eq!(result.kind, GestureKind::Wave);
    }

    #[test]
    fn pointing_needs_concentration() {
        // Delta 124 over one quadrant: motion = 31 > 30, region 124 > 50
        let result = classify(&sample_with(3 * QUADRANT..WINDOW, 124.0));
        assert_eq!(result.kind, GestureKind::Pointing);

        // Uniform 40: motion = 40 > 30, but no quadrant exceeds 50
        assert_eq!(classify(&vec![40.0; WINDOW]).kind, GestureKind::None);
    }

    #[test]
    fn pointing_thresholds_are_strict() {
        // motion == 30 exactly (uniform): not pointing
        assert_eq!(classify(&vec![30.0; WINDOW]).kind, GestureKind::None);

        // region max == 50 exactly: 50 * 250 / 1000 gives motion 12.5,
        // below the motion floor anyway, so force motion past 30 with a
        // uniform 31 whose regions all sit at 31 - still not pointing.
        assert_eq!(classify(&vec![31.0; WINDOW]).kind, GestureKind::None);
    }

    #[test]
    fn only_the_window_is_analysed() {
        let mut sample = vec![0.0; WINDOW + 500];
        for v in &mut sample[WINDOW..] {
            *v = 10_000.0;
        }
        // Wild values past index 999 must not influence the result
        assert_eq!(classify(&sample).kind, GestureKind::None);
    }

    #[test]
    fn undersized_sample_is_rejected() {
        let classifier = GestureClassifier::default();
        let short = vec![0.0; WINDOW - 1];
        assert_eq!(
            classifier.classify(&short, &zero_baseline()),
            Err(ClassifyError::WindowTooShort {
                required: WINDOW,
                available: WINDOW - 1,
            })
        );
        assert!(matches!(
            classifier.classify(&zero_baseline(), &short),
            Err(ClassifyError::WindowTooShort { .. })
        ));
    }

    #[test]
    fn nan_is_rejected() {
        let classifier = GestureClassifier::default();
        let mut sample = vec![0.0; WINDOW];
        sample[3] = f64::NAN;
        assert_eq!(
            classifier.classify(&sample, &zero_baseline()),
            Err(ClassifyError::InvalidValue)
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let classifier = GestureClassifier::default();
        let sample = sample_with(0..QUADRANT, 123.456);
        let baseline = sample_with(QUADRANT..2 * QUADRANT, 7.0);

        let first = classifier.classify(&sample, &baseline).unwrap();
        let second = classifier.classify(&sample, &baseline).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn baseline_is_respected() {
        // Identical sample and baseline: no motion at all
        let sample = sample_with(0..WINDOW, 999.0);
        let result = GestureClassifier::default()
            .classify(&sample, &sample)
            .unwrap();
        assert_eq!(result.kind, GestureKind::None);
        assert_eq!(result.motion, 0.0);
    }
}
