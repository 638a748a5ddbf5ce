//! Utility modules shared across the recommender
//!
//! - Normalization: percent positioning on fixed display ranges, top-k
//!   selection for confidence charts

pub mod normalization;

// Re-export commonly used functions
pub use normalization::{normalize, normalize_interval, top_k};
