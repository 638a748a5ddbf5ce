//! Crop conditions definition and the built-in crop table
//!
//! Defines the CropConditions struct representing one crop's optimal growing
//! intervals, plus the 22 built-in crops used when no training dataset is
//! available. Interval values follow the public crop recommendation dataset.

use serde::Serialize;

use crate::params::SoilParameter;

/// Optimal growing conditions for a single crop.
///
/// Each parameter carries an optimal interval `[min, max]` inside that
/// parameter's fixed display range. Serialized form is the `conditions`
/// object of the `/api/crop_conditions` response, so the crop name is kept
/// out of the payload.
#[derive(Debug, Clone, Serialize)]
pub struct CropConditions {
    #[serde(skip_serializing)]
    pub name: String,

    pub description: String,

    pub n_min: f64,
    pub n_max: f64,
    pub p_min: f64,
    pub p_max: f64,
    pub k_min: f64,
    pub k_max: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub ph_min: f64,
    pub ph_max: f64,
    pub rainfall_min: f64,
    pub rainfall_max: f64,
}

impl CropConditions {
    /// Optimal interval for one parameter.
    pub fn interval(&self, param: SoilParameter) -> (f64, f64) {
        match param {
            SoilParameter::Nitrogen => (self.n_min, self.n_max),
            SoilParameter::Phosphorus => (self.p_min, self.p_max),
            SoilParameter::Potassium => (self.k_min, self.k_max),
            SoilParameter::Temperature => (self.temperature_min, self.temperature_max),
            SoilParameter::Humidity => (self.humidity_min, self.humidity_max),
            SoilParameter::Ph => (self.ph_min, self.ph_max),
            SoilParameter::Rainfall => (self.rainfall_min, self.rainfall_max),
        }
    }

    /// Interval midpoints in form order, used as feature anchors by the
    /// fallback recommender.
    pub fn midpoints(&self) -> [f64; 7] {
        let mut mids = [0.0; 7];
        for (i, param) in SoilParameter::ALL.iter().enumerate() {
            let (min, max) = self.interval(*param);
            mids[i] = (min + max) / 2.0;
        }
        mids
    }
}

// ============================================================================
// Built-in Crop Table
// ============================================================================

fn rice() -> CropConditions {
    CropConditions {
        name: "rice".to_string(),
        description: "Rice is a staple food for over half the world's population. It grows best in warm, humid environments with plenty of water.".to_string(),
        n_min: 60.0, n_max: 100.0,
        p_min: 35.0, p_max: 60.0,
        k_min: 35.0, k_max: 45.0,
        temperature_min: 20.0, temperature_max: 27.0,
        humidity_min: 80.0, humidity_max: 85.0,
        ph_min: 5.0, ph_max: 8.0,
        rainfall_min: 180.0, rainfall_max: 300.0,
    }
}

fn maize() -> CropConditions {
    CropConditions {
        name: "maize".to_string(),
        description: "Maize (corn) is one of the most versatile crops, used for food, feed, and industrial products. It prefers warm soil and good drainage.".to_string(),
        n_min: 60.0, n_max: 100.0,
        p_min: 35.0, p_max: 60.0,
        k_min: 15.0, k_max: 25.0,
        temperature_min: 18.0, temperature_max: 26.0,
        humidity_min: 55.0, humidity_max: 75.0,
        ph_min: 5.5, ph_max: 7.0,
        rainfall_min: 60.0, rainfall_max: 110.0,
    }
}

fn chickpea() -> CropConditions {
    CropConditions {
        name: "chickpea".to_string(),
        description: "Chickpeas are drought-resistant legumes rich in protein. They grow well in semi-arid regions with moderate temperatures.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 15.0, temperature_max: 25.0,
        humidity_min: 20.0, humidity_max: 40.0,
        ph_min: 6.0, ph_max: 8.0,
        rainfall_min: 40.0, rainfall_max: 100.0,
    }
}

fn kidneybeans() -> CropConditions {
    CropConditions {
        name: "kidneybeans".to_string(),
        description: "Kidney beans require warm temperatures and moderate rainfall. They are nitrogen-fixing plants that improve soil fertility.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 18.0, temperature_max: 30.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 5.5, ph_max: 7.5,
        rainfall_min: 60.0, rainfall_max: 150.0,
    }
}

fn pigeonpeas() -> CropConditions {
    CropConditions {
        name: "pigeonpeas".to_string(),
        description: "Pigeon peas are drought-resistant legumes that can grow in marginal soils. They are an important source of protein in many regions.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 20.0, temperature_max: 35.0,
        humidity_min: 50.0, humidity_max: 80.0,
        ph_min: 5.0, ph_max: 7.0,
        rainfall_min: 60.0, rainfall_max: 150.0,
    }
}

fn mothbeans() -> CropConditions {
    CropConditions {
        name: "mothbeans".to_string(),
        description: "Moth beans are heat and drought tolerant, making them suitable for arid and semi-arid regions with limited rainfall.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 35.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 25.0, temperature_max: 35.0,
        humidity_min: 30.0, humidity_max: 60.0,
        ph_min: 6.0, ph_max: 7.5,
        rainfall_min: 40.0, rainfall_max: 100.0,
    }
}

fn mungbean() -> CropConditions {
    CropConditions {
        name: "mungbean".to_string(),
        description: "Mung beans are fast-growing legumes that prefer warm temperatures and moderate humidity. They are commonly used for sprouts.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 20.0, temperature_max: 35.0,
        humidity_min: 50.0, humidity_max: 80.0,
        ph_min: 6.0, ph_max: 7.5,
        rainfall_min: 60.0, rainfall_max: 150.0,
    }
}

fn blackgram() -> CropConditions {
    CropConditions {
        name: "blackgram".to_string(),
        description: "Black gram is a drought-resistant legume that grows well in a variety of soil types. It's an important source of protein.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 20.0, temperature_max: 35.0,
        humidity_min: 50.0, humidity_max: 80.0,
        ph_min: 6.0, ph_max: 7.5,
        rainfall_min: 60.0, rainfall_max: 150.0,
    }
}

fn lentil() -> CropConditions {
    CropConditions {
        name: "lentil".to_string(),
        description: "Lentils are cool-season legumes that are relatively drought tolerant. They are a good source of protein and fiber.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 15.0, temperature_max: 25.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 6.0, ph_max: 8.0,
        rainfall_min: 40.0, rainfall_max: 100.0,
    }
}

fn pomegranate() -> CropConditions {
    CropConditions {
        name: "pomegranate".to_string(),
        description: "Pomegranates are drought-tolerant fruit trees that prefer hot, dry summers and cool winters. They can grow in a variety of soil types.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 18.0, temperature_max: 35.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 5.5, ph_max: 7.5,
        rainfall_min: 50.0, rainfall_max: 100.0,
    }
}

fn banana() -> CropConditions {
    CropConditions {
        name: "banana".to_string(),
        description: "Bananas require consistent moisture and warm temperatures. They are sensitive to frost and wind damage.".to_string(),
        n_min: 75.0, n_max: 100.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 25.0, k_max: 55.0,
        temperature_min: 20.0, temperature_max: 30.0,
        humidity_min: 70.0, humidity_max: 90.0,
        ph_min: 5.5, ph_max: 7.0,
        rainfall_min: 120.0, rainfall_max: 220.0,
    }
}

fn mango() -> CropConditions {
    CropConditions {
        name: "mango".to_string(),
        description: "Mangoes thrive in tropical climates with distinct wet and dry seasons. They are sensitive to frost and cold temperatures.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 24.0, temperature_max: 35.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 5.5, ph_max: 7.5,
        rainfall_min: 80.0, rainfall_max: 180.0,
    }
}

fn grapes() -> CropConditions {
    CropConditions {
        name: "grapes".to_string(),
        description: "Grapes prefer warm, dry climates with long growing seasons. Good drainage is essential for grape cultivation.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 15.0, temperature_max: 30.0,
        humidity_min: 50.0, humidity_max: 80.0,
        ph_min: 5.5, ph_max: 7.0,
        rainfall_min: 50.0, rainfall_max: 100.0,
    }
}

fn watermelon() -> CropConditions {
    CropConditions {
        name: "watermelon".to_string(),
        description: "Watermelons need warm temperatures, plenty of sunlight, and moderate water. They grow best in well-drained, sandy loam soils.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 22.0, temperature_max: 30.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 5.5, ph_max: 7.0,
        rainfall_min: 40.0, rainfall_max: 100.0,
    }
}

fn muskmelon() -> CropConditions {
    CropConditions {
        name: "muskmelon".to_string(),
        description: "Muskmelons (cantaloupes) require warm temperatures and consistent moisture during the growing season. They are sensitive to frost.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 22.0, temperature_max: 30.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 6.0, ph_max: 7.0,
        rainfall_min: 40.0, rainfall_max: 100.0,
    }
}

fn apple() -> CropConditions {
    CropConditions {
        name: "apple".to_string(),
        description: "Apples require a period of winter dormancy (chill hours) and moderate summers. They grow best in well-drained, loamy soils.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 10.0, temperature_max: 25.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 5.5, ph_max: 7.0,
        rainfall_min: 80.0, rainfall_max: 120.0,
    }
}

fn orange() -> CropConditions {
    CropConditions {
        name: "orange".to_string(),
        description: "Oranges prefer subtropical climates with mild winters and warm summers. They require regular moisture for optimal fruit production.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 15.0, temperature_max: 30.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 5.5, ph_max: 7.0,
        rainfall_min: 80.0, rainfall_max: 180.0,
    }
}

fn papaya() -> CropConditions {
    CropConditions {
        name: "papaya".to_string(),
        description: "Papayas are fast-growing tropical fruits that require warm temperatures and regular moisture. They are sensitive to frost and waterlogging.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 22.0, temperature_max: 35.0,
        humidity_min: 60.0, humidity_max: 80.0,
        ph_min: 6.0, ph_max: 7.0,
        rainfall_min: 100.0, rainfall_max: 200.0,
    }
}

fn coconut() -> CropConditions {
    CropConditions {
        name: "coconut".to_string(),
        description: "Coconuts thrive in tropical coastal areas with high humidity and regular rainfall. They are salt-tolerant and can grow in sandy soils.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 45.0, p_max: 75.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 20.0, temperature_max: 35.0,
        humidity_min: 70.0, humidity_max: 90.0,
        ph_min: 5.5, ph_max: 7.0,
        rainfall_min: 150.0, rainfall_max: 250.0,
    }
}

fn cotton() -> CropConditions {
    CropConditions {
        name: "cotton".to_string(),
        description: "Cotton requires a long, warm growing season with plenty of sunshine. It prefers well-drained soils and moderate rainfall.".to_string(),
        n_min: 60.0, n_max: 100.0,
        p_min: 35.0, p_max: 65.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 20.0, temperature_max: 35.0,
        humidity_min: 40.0, humidity_max: 70.0,
        ph_min: 5.5, ph_max: 8.0,
        rainfall_min: 60.0, rainfall_max: 150.0,
    }
}

fn jute() -> CropConditions {
    CropConditions {
        name: "jute".to_string(),
        description: "Jute thrives in hot, humid conditions with abundant rainfall. It is often grown in rotation with rice in tropical regions.".to_string(),
        n_min: 60.0, n_max: 100.0,
        p_min: 35.0, p_max: 65.0,
        k_min: 35.0, k_max: 55.0,
        temperature_min: 25.0, temperature_max: 35.0,
        humidity_min: 70.0, humidity_max: 90.0,
        ph_min: 6.0, ph_max: 7.5,
        rainfall_min: 120.0, rainfall_max: 200.0,
    }
}

fn coffee() -> CropConditions {
    CropConditions {
        name: "coffee".to_string(),
        description: "Coffee grows best at higher elevations in tropical climates with well-defined wet and dry seasons. It prefers rich, well-drained soils.".to_string(),
        n_min: 15.0, n_max: 45.0,
        p_min: 35.0, p_max: 65.0,
        k_min: 15.0, k_max: 45.0,
        temperature_min: 15.0, temperature_max: 25.0,
        humidity_min: 50.0, humidity_max: 80.0,
        ph_min: 5.0, ph_max: 6.5,
        rainfall_min: 120.0, rainfall_max: 200.0,
    }
}

/// All built-in crops, in canonical display order.
pub fn default_crop_conditions() -> Vec<CropConditions> {
    vec![
        rice(),
        maize(),
        chickpea(),
        kidneybeans(),
        pigeonpeas(),
        mothbeans(),
        mungbean(),
        blackgram(),
        lentil(),
        pomegranate(),
        banana(),
        mango(),
        grapes(),
        watermelon(),
        muskmelon(),
        apple(),
        orange(),
        papaya(),
        coconut(),
        cotton(),
        jute(),
        coffee(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_22_crops_with_unique_names() {
        let crops = default_crop_conditions();
        assert_eq!(crops.len(), 22);

        let mut names: Vec<&str> = crops.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 22);
    }

    #[test]
    fn test_intervals_are_ordered_and_inside_display_ranges() {
        for crop in default_crop_conditions() {
            for param in SoilParameter::ALL {
                let (min, max) = crop.interval(param);
                assert!(min <= max, "{} {:?} interval reversed", crop.name, param);
                assert!(
                    min >= param.lo() && max <= param.hi(),
                    "{} {:?} interval outside display range",
                    crop.name,
                    param
                );
            }
        }
    }

    #[test]
    fn test_interval_accessor_matches_fields() {
        let rice = rice();
        assert_eq!(rice.interval(SoilParameter::Nitrogen), (60.0, 100.0));
        assert_eq!(rice.interval(SoilParameter::Rainfall), (180.0, 300.0));
    }

    #[test]
    fn test_serialized_conditions_omit_name() {
        let json = serde_json::to_value(rice()).unwrap();
        assert!(json.get("name").is_none());
        assert!(json.get("description").is_some());
        assert_eq!(json["n_min"], 60.0);
        assert_eq!(json["temperature_max"], 27.0);
    }

    #[test]
    fn test_midpoints_follow_form_order() {
        let mids = maize().midpoints();
        assert_eq!(mids[0], 80.0); // nitrogen (60+100)/2
        assert_eq!(mids[3], 22.0); // temperature (18+26)/2
    }
}
