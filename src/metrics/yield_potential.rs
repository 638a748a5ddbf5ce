//! METRIC: YIELD POTENTIAL
//!
//! Estimates how much of a crop's potential yield the given conditions
//! support, as the weighted parameter match expressed in percent, and names
//! the two parameters holding the yield back.

use serde::Serialize;

use crate::crop_table::CropConditions;
use crate::metrics::match_score::{unit_scores, weighted_match};
use crate::params::{SoilParameter, SoilReading};

/// Number of limiting factors reported.
const LIMITING_FACTORS: usize = 2;

/// Per-parameter unit scores keyed by display label.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledScores {
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f64,
    #[serde(rename = "Phosphorus")]
    pub phosphorus: f64,
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    #[serde(rename = "Rainfall")]
    pub rainfall: f64,
}

impl LabeledScores {
    fn from_unit_scores(scores: &[f64; 7]) -> Self {
        LabeledScores {
            nitrogen: scores[0],
            phosphorus: scores[1],
            potassium: scores[2],
            temperature: scores[3],
            humidity: scores[4],
            ph: scores[5],
            rainfall: scores[6],
        }
    }
}

/// Yield prediction served by `/api/predict_yield`.
#[derive(Debug, Clone, Serialize)]
pub struct YieldPrediction {
    /// Weighted match in percent
    pub yield_potential: f64,
    /// Unit scores (0-1) per parameter
    pub parameter_scores: LabeledScores,
    /// The two lowest-scoring parameters, ascending, as (label, score)
    pub limiting_factors: Vec<(String, f64)>,
}

/// Predict the attainable yield fraction for one crop under the reading.
pub fn predict_yield(reading: &SoilReading, conditions: &CropConditions) -> YieldPrediction {
    let scores = unit_scores(reading, conditions);
    let yield_potential = weighted_match(&scores) * 100.0;

    let mut labeled: Vec<(String, f64)> = SoilParameter::ALL
        .iter()
        .enumerate()
        .map(|(i, param)| (param.label().to_string(), scores[i]))
        .collect();
    labeled.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    labeled.truncate(LIMITING_FACTORS);

    YieldPrediction {
        yield_potential,
        parameter_scores: LabeledScores::from_unit_scores(&scores),
        limiting_factors: labeled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop_table::default_crop_conditions;
    use approx::assert_relative_eq;

    fn rice() -> CropConditions {
        default_crop_conditions().remove(0)
    }

    #[test]
    fn test_optimal_conditions_reach_full_yield() {
        let rice = rice();
        let prediction = predict_yield(&SoilReading::new(rice.midpoints()), &rice);
        assert_relative_eq!(prediction.yield_potential, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_limiting_factors_are_the_two_lowest() {
        let rice = rice();
        // Ideal except nitrogen (half of minimum) and rainfall (a third)
        let reading = SoilReading::new([30.0, 47.0, 40.0, 24.0, 82.0, 6.4, 60.0]);
        let prediction = predict_yield(&reading, &rice);

        assert_eq!(prediction.limiting_factors.len(), 2);
        let labels: Vec<&str> =
            prediction.limiting_factors.iter().map(|(l, _)| l.as_str()).collect();
        assert!(labels.contains(&"Nitrogen"));
        assert!(labels.contains(&"Rainfall"));
        // Ascending: rainfall at 60/180 scores lower than nitrogen at 30/60
        assert_eq!(prediction.limiting_factors[0].0, "Rainfall");
    }

    #[test]
    fn test_limiting_factor_ties_keep_label_order() {
        let rice = rice();
        let prediction = predict_yield(&SoilReading::new(rice.midpoints()), &rice);
        // All scores tie at 1.0, so the first two labels win
        assert_eq!(prediction.limiting_factors[0].0, "Nitrogen");
        assert_eq!(prediction.limiting_factors[1].0, "Phosphorus");
    }

    #[test]
    fn test_serialized_shape() {
        let rice = rice();
        let json =
            serde_json::to_value(predict_yield(&SoilReading::new(rice.midpoints()), &rice)).unwrap();
        assert!(json["yield_potential"].is_number());
        assert_eq!(json["parameter_scores"]["pH"], 1.0);
        assert!(json["limiting_factors"][0].is_array());
    }
}
