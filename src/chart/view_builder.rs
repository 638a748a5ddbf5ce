//! View Builder - Converts readings and scores to chart view models
//!
//! Positions soil readings and per-crop optimal intervals on each
//! parameter's display scale for Askama template rendering.

use crate::chart::view_models::{ConfidenceBar, ConfidenceChart, FitLevel, ParameterBar};
use crate::crop_table::CropConditions;
use crate::params::{SoilParameter, SoilReading};
use crate::utils::normalization::{normalize, normalize_interval, top_k};

/// Number of bars shown on the confidence chart.
const CONFIDENCE_BARS: usize = 5;

/// Build one bar per soil parameter, reading against the crop's intervals.
pub fn build_parameter_bars(reading: &SoilReading, conditions: &CropConditions) -> Vec<ParameterBar> {
    SoilParameter::ALL
        .iter()
        .map(|&param| build_parameter_bar(param, reading.get(param), conditions))
        .collect()
}

fn build_parameter_bar(
    param: SoilParameter,
    value: f64,
    conditions: &CropConditions,
) -> ParameterBar {
    let (min_val, max_val) = conditions.interval(param);
    let (range_start_percent, range_width_percent) =
        normalize_interval(min_val, max_val, param.lo(), param.hi());

    let fit = if value < min_val {
        FitLevel::Below
    } else if value > max_val {
        FitLevel::Above
    } else {
        FitLevel::Within
    };

    ParameterBar {
        key: param.key(),
        label: param.label(),
        unit: param.unit(),
        value,
        value_percent: normalize(value, param.lo(), param.hi()),
        range_start_percent,
        range_width_percent,
        fit,
    }
}

/// Build the confidence chart from a crop → percent map.
pub fn build_confidence_chart(confidences: &[(String, f64)]) -> ConfidenceChart {
    let bars = top_k(confidences, CONFIDENCE_BARS)
        .into_iter()
        .map(|(crop, percent)| ConfidenceBar { crop, percent })
        .collect();
    ConfidenceChart { bars }
}
