//! Soil and climate parameter domains.
//!
//! Every chart, gauge, and comparison table positions readings on the fixed
//! display range of one of these seven parameters. The ranges are display
//! constants matching the training dataset coverage, not agronomic extremes,
//! and they never vary per crop.

use serde::Serialize;

/// One measured parameter of a recommendation request.
///
/// Each variant carries its JSON key, display label, fixed display range
/// `[lo, hi]`, and unit together, so chart code never needs a separate
/// label-to-key mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilParameter {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl SoilParameter {
    /// All seven parameters in form and display order.
    pub const ALL: [SoilParameter; 7] = [
        SoilParameter::Nitrogen,
        SoilParameter::Phosphorus,
        SoilParameter::Potassium,
        SoilParameter::Temperature,
        SoilParameter::Humidity,
        SoilParameter::Ph,
        SoilParameter::Rainfall,
    ];

    /// Short key used in JSON payloads (`n_min`, `ph_max`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen => "n",
            SoilParameter::Phosphorus => "p",
            SoilParameter::Potassium => "k",
            SoilParameter::Temperature => "temperature",
            SoilParameter::Humidity => "humidity",
            SoilParameter::Ph => "ph",
            SoilParameter::Rainfall => "rainfall",
        }
    }

    /// Field name in the recommendation form.
    pub fn form_field(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen => "nitrogen",
            SoilParameter::Phosphorus => "phosphorus",
            SoilParameter::Potassium => "potassium",
            SoilParameter::Temperature => "temperature",
            SoilParameter::Humidity => "humidity",
            SoilParameter::Ph => "ph",
            SoilParameter::Rainfall => "rainfall",
        }
    }

    /// Human-readable label for chart axes and tables.
    pub fn label(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen => "Nitrogen",
            SoilParameter::Phosphorus => "Phosphorus",
            SoilParameter::Potassium => "Potassium",
            SoilParameter::Temperature => "Temperature",
            SoilParameter::Humidity => "Humidity",
            SoilParameter::Ph => "pH",
            SoilParameter::Rainfall => "Rainfall",
        }
    }

    /// Lower bound of the fixed display range.
    pub fn lo(&self) -> f64 {
        match self {
            SoilParameter::Nitrogen => 0.0,
            SoilParameter::Phosphorus => 5.0,
            SoilParameter::Potassium => 5.0,
            SoilParameter::Temperature => 0.0,
            SoilParameter::Humidity => 0.0,
            SoilParameter::Ph => 0.0,
            SoilParameter::Rainfall => 0.0,
        }
    }

    /// Upper bound of the fixed display range.
    pub fn hi(&self) -> f64 {
        match self {
            SoilParameter::Nitrogen => 140.0,
            SoilParameter::Phosphorus => 145.0,
            SoilParameter::Potassium => 205.0,
            SoilParameter::Temperature => 50.0,
            SoilParameter::Humidity => 100.0,
            SoilParameter::Ph => 14.0,
            SoilParameter::Rainfall => 300.0,
        }
    }

    /// Unit suffix for display. Empty for dimensionless pH.
    pub fn unit(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen => "kg/ha",
            SoilParameter::Phosphorus => "kg/ha",
            SoilParameter::Potassium => "kg/ha",
            SoilParameter::Temperature => "°C",
            SoilParameter::Humidity => "%",
            SoilParameter::Ph => "",
            SoilParameter::Rainfall => "mm",
        }
    }

    /// Resolve a short JSON key back to its parameter.
    pub fn from_key(key: &str) -> Option<SoilParameter> {
        SoilParameter::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// Position in [`SoilParameter::ALL`].
    pub fn index(&self) -> usize {
        match self {
            SoilParameter::Nitrogen => 0,
            SoilParameter::Phosphorus => 1,
            SoilParameter::Potassium => 2,
            SoilParameter::Temperature => 3,
            SoilParameter::Humidity => 4,
            SoilParameter::Ph => 5,
            SoilParameter::Rainfall => 6,
        }
    }
}

/// One complete set of user-supplied readings, in [`SoilParameter::ALL`]
/// order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilReading {
    pub values: [f64; 7],
}

impl SoilReading {
    pub fn new(values: [f64; 7]) -> Self {
        SoilReading { values }
    }

    /// Reading for one parameter.
    pub fn get(&self, param: SoilParameter) -> f64 {
        self.values[param.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_order_matches_form_order() {
        let keys: Vec<&str> = SoilParameter::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(keys, vec!["n", "p", "k", "temperature", "humidity", "ph", "rainfall"]);
    }

    #[test]
    fn test_display_ranges_are_non_degenerate() {
        for param in SoilParameter::ALL {
            assert!(param.lo() < param.hi(), "{:?} has degenerate range", param);
        }
    }

    #[test]
    fn test_from_key_round_trip() {
        for param in SoilParameter::ALL {
            assert_eq!(SoilParameter::from_key(param.key()), Some(param));
        }
        assert_eq!(SoilParameter::from_key("bogus"), None);
    }

    #[test]
    fn test_ph_has_no_unit() {
        assert_eq!(SoilParameter::Ph.unit(), "");
        assert_eq!(SoilParameter::Humidity.unit(), "%");
    }
}
