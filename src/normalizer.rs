//! Score normalizer: sums the point breakdown into a `base_score`, then
//! applies the affine transform that maps it into the public Blink Score.
//! See `spec.md` §4.4.

use crate::config::ScoringThresholds;
use crate::types::PointBreakdown;

/// `base_score = Σ` the ten point-breakdown fields (liquidity composite and
/// the deposit-multiplicity penalty included).
pub fn base_score(points: &PointBreakdown) -> i32 {
    points.sum()
}

/// `blink_score = clamp(center + scale * (base - mean) / stddev, 0, 100)`,
/// rounded to two decimal places.
pub fn blink_score(base: i32, thresholds: &ScoringThresholds) -> f64 {
    let raw = thresholds.normalize_center
        + thresholds.normalize_scale * (base as f64 - thresholds.normalize_mean)
            / thresholds.normalize_stddev;
    let clamped = raw.clamp(0.0, 100.0);
    (clamped * 100.0).round() / 100.0
}
