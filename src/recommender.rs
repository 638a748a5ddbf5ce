//! Crop Recommender - nearest-neighbour vote over the training dataset
//!
//! Z-normalizes the incoming reading with the dataset's column statistics,
//! scans every training row for Euclidean distance (Rayon across rows), and
//! lets the five nearest vote. Confidence per crop is its share of the five
//! votes in percent; the served map is the top five entries, descending.
//!
//! Without a dataset the recommender still answers: the weighted interval
//! match against the built-in crop table stands in for the vote shares.

use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::data::CropData;
use crate::metrics::match_score::{unit_scores, weighted_match};
use crate::params::SoilReading;
use crate::utils::normalization::top_k;

/// Number of neighbours that vote on a recommendation.
pub const K_NEIGHBOURS: usize = 5;

/// Epsilon added to the std divisor so constant columns stay finite.
const STD_EPSILON: f64 = 1e-8;

/// A recommendation with its served confidence map.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub crop: String,
    /// Top-K `(crop, percent)` pairs, descending; ties keep table order
    pub confidence_scores: Vec<(String, f64)>,
}

/// Main recommendation engine
pub struct CropRecommender {
    data: CropData,

    /// Training features z-normalized once at startup, row order preserved
    normalized: Vec<[f64; 7]>,
}

impl CropRecommender {
    /// Initialize from the dataset directory.
    pub fn new(data_dir: &Path) -> Result<Self> {
        println!("\nInitializing Crop Recommender (Rust)...");
        let data = CropData::load(data_dir)?;
        let recommender = Self::from_data(data);

        println!("Crop Recommender initialized:");
        println!("  Crops: {}", recommender.data.conditions().len());
        println!("  Training samples: {}", recommender.normalized.len());
        println!();

        Ok(recommender)
    }

    /// Build from already-loaded data. Used directly by tests.
    pub fn from_data(data: CropData) -> Self {
        let normalized = match &data.stats {
            Some(stats) => data
                .samples
                .iter()
                .map(|sample| {
                    let mut row = [0.0; 7];
                    for i in 0..7 {
                        row[i] =
                            (sample.features[i] - stats.mean[i]) / (stats.std[i] + STD_EPSILON);
                    }
                    row
                })
                .collect(),
            None => Vec::new(),
        };

        CropRecommender { data, normalized }
    }

    /// Access crop data (conditions lookups, crop listing).
    pub fn data(&self) -> &CropData {
        &self.data
    }

    /// Recommend a crop for the reading.
    pub fn recommend(&self, reading: &SoilReading) -> Recommendation {
        if self.normalized.is_empty() {
            self.recommend_from_table(reading)
        } else {
            self.recommend_knn(reading)
        }
    }

    fn recommend_knn(&self, reading: &SoilReading) -> Recommendation {
        let Some(stats) = &self.data.stats else {
            return self.recommend_from_table(reading);
        };

        let mut query = [0.0; 7];
        for i in 0..7 {
            query[i] = (reading.values[i] - stats.mean[i]) / (stats.std[i] + STD_EPSILON);
        }

        // Distance to every training row; sort is stable, so equal distances
        // keep row order
        let mut distances: Vec<(f64, usize)> = self
            .normalized
            .par_iter()
            .enumerate()
            .map(|(idx, row)| (euclidean_distance(&query, row), idx))
            .collect();
        distances
            .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let k = K_NEIGHBOURS.min(distances.len());
        let nearest = &distances[..k];

        // Vote counts in nearest-first order of first appearance
        let mut votes: SmallVec<[(&str, usize); K_NEIGHBOURS]> = SmallVec::new();
        for &(_, idx) in nearest {
            let crop = self.data.samples[idx].crop.as_str();
            match votes.iter_mut().find(|(name, _)| *name == crop) {
                Some(entry) => entry.1 += 1,
                None => votes.push((crop, 1)),
            }
        }

        // Mode; on ties the earlier first vote wins
        let mut winner = "";
        let mut winner_votes = 0;
        for &(crop, count) in &votes {
            if count > winner_votes {
                winner = crop;
                winner_votes = count;
            }
        }

        // Full confidence map in table order, vote shares filled in
        let mut confidences: Vec<(String, f64)> = self
            .data
            .conditions()
            .iter()
            .map(|c| (c.name.clone(), 0.0))
            .collect();
        for &(crop, count) in &votes {
            if let Some(entry) = confidences.iter_mut().find(|(name, _)| name == crop) {
                entry.1 = count as f64 / k as f64 * 100.0;
            }
        }

        Recommendation {
            crop: winner.to_string(),
            confidence_scores: top_k(&confidences, K_NEIGHBOURS),
        }
    }

    /// Table-only fallback: weighted interval match as pseudo-confidence.
    fn recommend_from_table(&self, reading: &SoilReading) -> Recommendation {
        let confidences: Vec<(String, f64)> = self
            .data
            .conditions()
            .iter()
            .map(|conditions| {
                let scores = unit_scores(reading, conditions);
                (conditions.name.clone(), weighted_match(&scores) * 100.0)
            })
            .collect();

        let top = top_k(&confidences, K_NEIGHBOURS);
        let crop = top.first().map(|(name, _)| name.clone()).unwrap_or_default();

        Recommendation { crop, confidence_scores: top }
    }
}

fn euclidean_distance(a: &[f64; 7], b: &[f64; 7]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{compute_feature_stats, derive_conditions, CropData, TrainingSample};
    use approx::assert_relative_eq;

    fn sample(crop: &str, features: [f64; 7]) -> TrainingSample {
        TrainingSample { features, crop: crop.to_string() }
    }

    /// Small synthetic dataset: two well-separated crops.
    fn test_data() -> CropData {
        let mut samples = Vec::new();
        // Paddy-like rows
        for i in 0..6 {
            let jitter = i as f64;
            samples.push(sample(
                "rice",
                [80.0 + jitter, 47.0, 40.0, 23.5, 82.0, 6.4, 230.0 + jitter],
            ));
        }
        // Dryland rows
        for i in 0..6 {
            let jitter = i as f64;
            samples.push(sample(
                "chickpea",
                [40.0 + jitter, 67.0, 79.0, 18.8, 16.0, 7.3, 80.0 + jitter],
            ));
        }
        CropData::from_samples(samples)
    }

    #[test]
    fn test_knn_recommends_nearest_cluster() {
        let recommender = CropRecommender::from_data(test_data());
        let paddy = SoilReading::new([82.0, 47.0, 40.0, 23.0, 81.0, 6.4, 228.0]);

        let rec = recommender.recommend(&paddy);
        assert_eq!(rec.crop, "rice");

        // Unanimous vote: 100% confidence for rice, zero elsewhere
        assert_relative_eq!(rec.confidence_scores[0].1, 100.0);
        assert_eq!(rec.confidence_scores[0].0, "rice");
        assert!(rec.confidence_scores[1..].iter().all(|(_, pct)| *pct == 0.0));
    }

    #[test]
    fn test_confidence_map_has_k_entries_descending() {
        let recommender = CropRecommender::from_data(test_data());
        let rec = recommender.recommend(&SoilReading::new([60.0, 57.0, 60.0, 21.0, 50.0, 6.8, 150.0]));

        assert_eq!(rec.confidence_scores.len(), 2); // only two crops exist
        for pair in rec.confidence_scores.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_votes_sum_to_100_percent() {
        let recommender = CropRecommender::from_data(test_data());
        let rec = recommender.recommend(&SoilReading::new([60.0, 57.0, 60.0, 21.0, 50.0, 6.8, 150.0]));

        let total: f64 = rec.confidence_scores.iter().map(|(_, pct)| pct).sum();
        assert_relative_eq!(total, 100.0);
    }

    #[test]
    fn test_builtin_fallback_recommends_rice_for_paddy_conditions() {
        let recommender = CropRecommender::from_data(CropData::from_builtin());
        let paddy = SoilReading::new([80.0, 47.0, 40.0, 24.0, 82.0, 6.4, 230.0]);

        let rec = recommender.recommend(&paddy);
        assert_eq!(rec.crop, "rice");
        assert_eq!(rec.confidence_scores.len(), K_NEIGHBOURS);
        assert_relative_eq!(rec.confidence_scores[0].1, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_derived_conditions_match_sample_clusters() {
        let data = test_data();
        let rice = data.get("rice").expect("rice derived from samples");
        // Observed nitrogen range is [80, 85]; the buffer widens it by 0.5
        assert_relative_eq!(rice.n_min, 79.5);
        assert_relative_eq!(rice.n_max, 85.5);
    }

    #[test]
    fn test_stats_reflect_all_rows() {
        let data = test_data();
        let stats = compute_feature_stats(&data.samples);
        // Mean nitrogen across both clusters: (80..=85 and 40..=45) → 62.5
        assert_relative_eq!(stats.mean[0], 62.5);
    }

    // Keep the helper used by test_data() honest about derivation order
    #[test]
    fn test_sample_constructor_keeps_first_seen_crop_order() {
        let names: Vec<String> = derive_conditions(&test_data().samples)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["rice", "chickpea"]);
    }
}
