//! View Models for Chart Rendering
//!
//! Structured data types positioned on percent-based scales, consumed by the
//! Askama templates and the JSON API.

use serde::Serialize;

/// Where a reading sits relative to a crop's optimal interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum FitLevel {
    Below,
    #[default]
    Within,
    Above,
}

impl FitLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            FitLevel::Below => "fit-below",
            FitLevel::Within => "fit-within",
            FitLevel::Above => "fit-above",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitLevel::Below => "Below range",
            FitLevel::Within => "Within range",
            FitLevel::Above => "Above range",
        }
    }
}

/// One soil parameter rendered against a crop's optimal interval.
///
/// Percent values are positions on the parameter's display scale. They are
/// not clamped: a reading outside the scale lands outside [0, 100] and
/// visibly overflows the chart axis instead of being truncated.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterBar {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    /// Raw reading in parameter units
    pub value: f64,
    /// Reading position on the display scale
    pub value_percent: f64,
    /// Left edge of the optimal interval on the display scale
    pub range_start_percent: f64,
    /// Width of the optimal interval on the display scale
    pub range_width_percent: f64,
    pub fit: FitLevel,
}

impl ParameterBar {
    pub fn value_display(&self) -> String {
        if self.unit.is_empty() {
            format!("{:.1}", self.value)
        } else {
            format!("{:.1} {}", self.value, self.unit)
        }
    }
}

/// One labeled bar of the confidence chart
#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceBar {
    pub crop: String,
    pub percent: f64,
}

impl ConfidenceBar {
    pub fn percent_display(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

/// Top recommendations as percent bars, strongest first
#[derive(Debug, Clone, Serialize, Default)]
pub struct ConfidenceChart {
    pub bars: Vec<ConfidenceBar>,
}
