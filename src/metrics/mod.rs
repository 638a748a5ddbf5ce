//! Metric modules for crop and soil analysis
//!
//! Each metric is implemented in its own module: the shared parameter match
//! kernel, the crop-independent soil health rating, and the per-crop yield
//! estimate built on the match kernel.

pub mod match_score;
pub mod soil_health;
pub mod yield_potential;

// Re-export metric functions
pub use match_score::{parameter_score, rank_suitable_crops, SuitableCrop, PARAMETER_WEIGHTS};
pub use soil_health::{analyze_soil_health, HealthCategory, SoilHealthReport};
pub use yield_potential::{predict_yield, YieldPrediction};
