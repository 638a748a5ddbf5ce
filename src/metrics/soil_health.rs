//! METRIC: SOIL HEALTH
//!
//! Rates the bare soil itself, independent of any crop, from the four
//! parameters an amendment can actually change (N, P, K, pH). Each
//! parameter contributes 1-3 points: 3 inside the healthy band, 2 when
//! oversupplied, 1 when deficient; pH scores 1 on either side of its band.
//! Out-of-band parameters each add an amendment recommendation.

use serde::Serialize;

/// Health category thresholds on the 0-100 score.
const GOOD_THRESHOLD: f64 = 75.0;
const MODERATE_THRESHOLD: f64 = 50.0;

/// Maximum attainable raw score (four parameters worth 3 points each).
const MAX_RAW_SCORE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthCategory {
    Good,
    Moderate,
    Poor,
}

impl HealthCategory {
    fn from_score(score: f64) -> Self {
        if score >= GOOD_THRESHOLD {
            HealthCategory::Good
        } else if score >= MODERATE_THRESHOLD {
            HealthCategory::Moderate
        } else {
            HealthCategory::Poor
        }
    }
}

/// Soil health report served by `/api/analyze_soil`.
#[derive(Debug, Clone, Serialize)]
pub struct SoilHealthReport {
    /// 0-100, raw points over [`MAX_RAW_SCORE`]
    pub score: f64,
    pub category: HealthCategory,
    pub recommendations: Vec<String>,
}

/// Analyze soil health from N, P, K and pH readings.
pub fn analyze_soil_health(n: f64, p: f64, k: f64, ph: f64) -> SoilHealthReport {
    let mut raw_score = 0.0;
    let mut recommendations = Vec::new();

    if n < 30.0 {
        raw_score += 1.0;
        recommendations.push(
            "Low nitrogen levels. Consider adding nitrogen-rich fertilizers or compost.".to_string(),
        );
    } else if n > 100.0 {
        raw_score += 2.0;
        recommendations
            .push("High nitrogen levels. Consider planting nitrogen-depleting crops.".to_string());
    } else {
        raw_score += 3.0;
    }

    if p < 20.0 {
        raw_score += 1.0;
        recommendations
            .push("Low phosphorus levels. Consider adding bone meal or rock phosphate.".to_string());
    } else if p > 80.0 {
        raw_score += 2.0;
        recommendations.push(
            "High phosphorus levels. Avoid adding more phosphorus-rich fertilizers.".to_string(),
        );
    } else {
        raw_score += 3.0;
    }

    if k < 20.0 {
        raw_score += 1.0;
        recommendations.push(
            "Low potassium levels. Consider adding wood ash or potassium-rich fertilizers."
                .to_string(),
        );
    } else if k > 80.0 {
        raw_score += 2.0;
        recommendations.push(
            "High potassium levels. Avoid adding more potassium-rich fertilizers.".to_string(),
        );
    } else {
        raw_score += 3.0;
    }

    if ph < 5.5 {
        raw_score += 1.0;
        recommendations.push("Soil is too acidic. Consider adding lime to raise pH.".to_string());
    } else if ph > 7.5 {
        raw_score += 1.0;
        recommendations
            .push("Soil is too alkaline. Consider adding sulfur to lower pH.".to_string());
    } else {
        raw_score += 3.0;
    }

    let score = raw_score / MAX_RAW_SCORE * 100.0;

    SoilHealthReport {
        score,
        category: HealthCategory::from_score(score),
        recommendations,
    }
}
