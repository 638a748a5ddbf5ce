//! Crop Recommender Rust Implementation
//!
//! Crop recommendation from soil and climate readings, following a modular
//! structure:
//! - `params`: the seven soil parameters and their display scales
//! - `utils/`: range normalization for chart scales
//! - `crop_table` / `data`: built-in crop conditions and dataset loading with Polars
//! - `recommender`: nearest-neighbour recommendation engine
//! - `metrics/`: suitability, soil health, and yield analysis
//! - `chart/`: percent-scale view models for rendering
//!
//! The `api` feature adds the Axum HTTP server and Askama-rendered pages.

pub mod api_server;
pub mod chart;
pub mod crop_table;
pub mod data;
pub mod metrics;
pub mod params;
pub mod recommender;
pub mod utils;

#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use crop_table::{default_crop_conditions, CropConditions};
pub use data::CropData;
pub use metrics::*;
pub use params::{SoilParameter, SoilReading};
pub use recommender::{CropRecommender, Recommendation};
pub use utils::{normalize, normalize_interval, top_k};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
