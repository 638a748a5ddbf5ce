//! METRIC: PARAMETER MATCH SCORE
//!
//! Scores how close a reading sits to a crop's optimal interval, per
//! parameter and as a weighted overall match. This is the kernel behind
//! both yield prediction and the reverse lookup ("which crops fit these
//! conditions").
//!
//! Per-parameter scoring is ratio-based rather than distance-based: a value
//! 50% below the interval minimum scores 0.5, as does a value 100% above
//! the maximum. Inside the interval the score is always 1.

use serde::Serialize;

use crate::crop_table::CropConditions;
use crate::params::{SoilParameter, SoilReading};

/// Weight per parameter in [`SoilParameter::ALL`] order. Humidity carries
/// slightly less weight than the others; weights sum to 1.
pub const PARAMETER_WEIGHTS: [f64; 7] = [0.15, 0.15, 0.15, 0.15, 0.10, 0.15, 0.15];

/// Score one reading against one optimal interval, in `[0, 1]`.
///
/// Below the interval the score is `value / min`, above it `max / value`,
/// inside it 1. Negative ratios floor at 0.
pub fn parameter_score(value: f64, min_val: f64, max_val: f64) -> f64 {
    if value < min_val {
        (value / min_val).max(0.0)
    } else if value > max_val {
        (max_val / value).max(0.0)
    } else {
        1.0
    }
}

/// Per-parameter match scores scaled to 0-100, serialized under the long
/// form-field keys.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterScores {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl ParameterScores {
    fn from_unit_scores(scores: &[f64; 7]) -> Self {
        ParameterScores {
            nitrogen: scores[0] * 100.0,
            phosphorus: scores[1] * 100.0,
            potassium: scores[2] * 100.0,
            temperature: scores[3] * 100.0,
            humidity: scores[4] * 100.0,
            ph: scores[5] * 100.0,
            rainfall: scores[6] * 100.0,
        }
    }
}

/// One ranked entry of the reverse lookup.
#[derive(Debug, Clone, Serialize)]
pub struct SuitableCrop {
    pub crop: String,
    /// Weighted overall match, 0-100
    pub score: f64,
    pub parameter_scores: ParameterScores,
}

/// Per-parameter unit scores for a reading against one crop.
pub fn unit_scores(reading: &SoilReading, conditions: &CropConditions) -> [f64; 7] {
    let mut scores = [0.0; 7];
    for (i, param) in SoilParameter::ALL.iter().enumerate() {
        let (min, max) = conditions.interval(*param);
        scores[i] = parameter_score(reading.get(*param), min, max);
    }
    scores
}

/// Weighted overall match in `[0, 1]`.
pub fn weighted_match(scores: &[f64; 7]) -> f64 {
    scores
        .iter()
        .zip(PARAMETER_WEIGHTS.iter())
        .map(|(score, weight)| score * weight)
        .sum()
}

/// Rank every crop by weighted match against the reading, descending.
///
/// Equal scores keep table order (stable sort). Callers truncate for
/// display; the API serves the top 10.
pub fn rank_suitable_crops(reading: &SoilReading, crops: &[CropConditions]) -> Vec<SuitableCrop> {
    let mut ranked: Vec<SuitableCrop> = crops
        .iter()
        .map(|conditions| {
            let scores = unit_scores(reading, conditions);
            SuitableCrop {
                crop: conditions.name.clone(),
                score: weighted_match(&scores) * 100.0,
                parameter_scores: ParameterScores::from_unit_scores(&scores),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}
