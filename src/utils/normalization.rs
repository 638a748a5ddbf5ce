//! Range normalization utilities.
//!
//! Maps raw physical measurements onto a common 0-100 percent scale so
//! parameters with incompatible units (kg/ha, °C, mm) can share one chart
//! axis. All functions here are pure arithmetic over `f64`: no clamping,
//! no validation, no error paths. Out-of-range inputs normalize to <0% or
//! >100% and overflow the axis visibly instead of being truncated.

use std::cmp::Ordering;

/// Position a value inside the range `[lo, hi]` as a percentage.
///
/// `percent = (value - lo) / (hi - lo) * 100`
///
/// Not clamped. A degenerate range (`lo == hi`) divides by zero and yields
/// `NaN` or `±inf` per IEEE-754; the fixed display ranges in
/// [`SoilParameter`](crate::params::SoilParameter) are never degenerate, so
/// this only arises from caller-supplied ranges.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    (value - lo) / (hi - lo) * 100.0
}

/// Position an interval `[min, max]` inside `[lo, hi]` as (start, width)
/// percentages, for rendering an optimal-range overlay bar.
///
/// Width is `>= 0` whenever `min <= max`; a reversed interval produces a
/// negative width, which is not guarded here.
pub fn normalize_interval(min: f64, max: f64, lo: f64, hi: f64) -> (f64, f64) {
    let start = normalize(min, lo, hi);
    let width = (max - min) / (hi - lo) * 100.0;
    (start, width)
}

/// Descending order on scores with NaN sorting below every real score.
fn cmp_scores_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater, // NaN ranks last
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Select the `k` highest-scoring `(label, score)` pairs, descending.
///
/// Ties keep insertion order (stable sort). `k` larger than the input
/// returns everything. Labels are assumed unique; duplicates are not
/// deduplicated.
pub fn top_k(scores: &[(String, f64)], k: usize) -> Vec<(String, f64)> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| cmp_scores_desc(a.1, b.1));
    ranked.truncate(k);
    ranked
}
