//! Data Loading and Management
//!
//! Loads the crop training dataset with Polars and derives per-crop optimal
//! conditions plus the feature statistics the recommender trains on. When no
//! dataset is present the built-in crop table takes over, so the engine
//! always starts.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;

use crate::crop_table::{default_crop_conditions, CropConditions};
use crate::params::SoilParameter;

/// Training CSV layout: seven feature columns then the crop label.
pub const FEATURE_COLUMNS: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Default dataset file name inside `DATA_DIR`.
pub const DATASET_FILE: &str = "Crop_recommendation.csv";

/// One labelled row of the training dataset, features in form order.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    pub features: [f64; 7],
    pub crop: String,
}

/// Column-wise mean and population standard deviation over the dataset.
///
/// Queries are z-normalized with these before distance computation; the
/// `+ 1e-8` epsilon in the divisor lives in the recommender, not here.
#[derive(Debug, Clone, Default)]
pub struct FeatureStats {
    pub mean: [f64; 7],
    pub std: [f64; 7],
}

/// Main data holder for crop recommendation
pub struct CropData {
    /// Optimal conditions per crop, canonical order
    conditions: Vec<CropConditions>,

    /// Lowercased crop name → index into `conditions`
    index: FxHashMap<String, usize>,

    /// Labelled samples; empty when running from the built-in table
    pub samples: Vec<TrainingSample>,

    /// Feature statistics over `samples`; None without a dataset
    pub stats: Option<FeatureStats>,
}

impl CropData {
    /// Build from the built-in 22-crop table, with no training samples.
    pub fn from_builtin() -> Self {
        Self::from_conditions(default_crop_conditions(), Vec::new(), None)
    }

    /// Load the training dataset from `data_dir`, deriving crop conditions
    /// and feature statistics from it. A missing file is not an error: the
    /// built-in table is used instead.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let csv_path = data_dir.join(DATASET_FILE);
        if !csv_path.exists() {
            println!("Dataset not found at {:?}, using built-in crop table", csv_path);
            return Ok(Self::from_builtin());
        }

        println!("Loading training dataset from {:?}...", csv_path);
        let samples = load_samples(&csv_path)?;
        let data = Self::from_samples(samples);

        println!("  Samples: {}", data.samples.len());
        println!("  Crops: {}", data.conditions.len());

        Ok(data)
    }

    /// Build from labelled samples, deriving conditions and statistics.
    pub fn from_samples(samples: Vec<TrainingSample>) -> Self {
        let conditions = derive_conditions(&samples);
        let stats = compute_feature_stats(&samples);
        Self::from_conditions(conditions, samples, Some(stats))
    }

    fn from_conditions(
        conditions: Vec<CropConditions>,
        samples: Vec<TrainingSample>,
        stats: Option<FeatureStats>,
    ) -> Self {
        let mut index = FxHashMap::default();
        for (i, crop) in conditions.iter().enumerate() {
            index.insert(crop.name.to_lowercase(), i);
        }
        CropData { conditions, index, samples, stats }
    }

    /// Case-insensitive conditions lookup.
    pub fn get(&self, crop_name: &str) -> Option<&CropConditions> {
        self.index
            .get(&crop_name.to_lowercase())
            .map(|&i| &self.conditions[i])
    }

    /// All crops in canonical order.
    pub fn conditions(&self) -> &[CropConditions] {
        &self.conditions
    }

    /// Crop names in canonical order, as served by `/api/crops`.
    pub fn crop_names(&self) -> Vec<String> {
        self.conditions.iter().map(|c| c.name.clone()).collect()
    }
}

/// Read the CSV into labelled samples, keeping row order.
///
/// Integer-typed columns (N, P, K) are cast to f64 so every feature shares
/// one dtype.
fn load_samples(path: &Path) -> Result<Vec<TrainingSample>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load training dataset: {:?}", path))?;

    let mut casted = Vec::with_capacity(7);
    for name in FEATURE_COLUMNS {
        let column = df
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;
        casted.push(column);
    }

    let mut feature_cols = Vec::with_capacity(7);
    for column in &casted {
        feature_cols.push(column.f64().with_context(|| "Cast to f64 failed")?);
    }

    let labels = df
        .column("label")
        .with_context(|| "Column 'label' not found")?
        .str()
        .with_context(|| "Column 'label' is not string type")?;

    let mut samples = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let Some(crop) = labels.get(idx) else { continue };
        if crop.is_empty() {
            continue;
        }

        let mut features = [0.0; 7];
        for (j, ca) in feature_cols.iter().enumerate() {
            features[j] = ca.get(idx).unwrap_or(0.0);
        }

        samples.push(TrainingSample { features, crop: crop.to_string() });
    }

    Ok(samples)
}

/// Per-crop accumulation used while deriving conditions from samples.
#[derive(Debug, Clone)]
struct CropAccumulator {
    count: usize,
    sum: [f64; 7],
    min: [f64; 7],
    max: [f64; 7],
}

impl CropAccumulator {
    fn new() -> Self {
        CropAccumulator {
            count: 0,
            sum: [0.0; 7],
            min: [f64::INFINITY; 7],
            max: [f64::NEG_INFINITY; 7],
        }
    }

    fn add(&mut self, features: &[f64; 7]) {
        self.count += 1;
        for i in 0..7 {
            self.sum[i] += features[i];
            self.min[i] = self.min[i].min(features[i]);
            self.max[i] = self.max[i].max(features[i]);
        }
    }
}

/// Derive per-crop optimal intervals from observed samples.
///
/// Each interval is the observed [min, max] widened by 10% of its span on
/// both sides, with the physical floors and ceilings applied: every minimum
/// clamps at 0, humidity tops out at 100 and pH at 14. The description is
/// generated from the per-crop means.
pub fn derive_conditions(samples: &[TrainingSample]) -> Vec<CropConditions> {
    let mut order: Vec<String> = Vec::new();
    let mut accs: FxHashMap<String, CropAccumulator> = FxHashMap::default();

    for sample in samples {
        if !accs.contains_key(&sample.crop) {
            order.push(sample.crop.clone());
        }
        accs.entry(sample.crop.clone())
            .or_insert_with(CropAccumulator::new)
            .add(&sample.features);
    }

    order
        .into_iter()
        .map(|name| {
            let acc = &accs[&name];
            let n = acc.count as f64;

            let mut lo = [0.0; 7];
            let mut hi = [0.0; 7];
            let mut avg = [0.0; 7];
            for i in 0..7 {
                let span = acc.max[i] - acc.min[i];
                lo[i] = (acc.min[i] - 0.1 * span).max(0.0);
                hi[i] = acc.max[i] + 0.1 * span;
                avg[i] = acc.sum[i] / n;
            }
            // Physical ceilings
            hi[4] = hi[4].min(SoilParameter::Humidity.hi());
            hi[5] = hi[5].min(SoilParameter::Ph.hi());

            let description = describe_crop(&name, &avg);

            CropConditions {
                name,
                description,
                n_min: lo[0],
                n_max: hi[0],
                p_min: lo[1],
                p_max: hi[1],
                k_min: lo[2],
                k_max: hi[2],
                temperature_min: lo[3],
                temperature_max: hi[3],
                humidity_min: lo[4],
                humidity_max: hi[4],
                ph_min: lo[5],
                ph_max: hi[5],
                rainfall_min: lo[6],
                rainfall_max: hi[6],
            }
        })
        .collect()
}

fn describe_crop(name: &str, avg: &[f64; 7]) -> String {
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };

    format!(
        "{} typically grows well with nitrogen levels around {:.1} kg/ha, \
         phosphorus around {:.1} kg/ha, and potassium around {:.1} kg/ha. \
         Optimal temperature is approximately {:.1}°C with humidity of {:.1}%. \
         It prefers soil with pH of {:.1} and rainfall of about {:.1} mm.",
        capitalized, avg[0], avg[1], avg[2], avg[3], avg[4], avg[5], avg[6]
    )
}

/// Column means and population standard deviations over all samples.
pub fn compute_feature_stats(samples: &[TrainingSample]) -> FeatureStats {
    let n = samples.len() as f64;
    let mut stats = FeatureStats::default();
    if samples.is_empty() {
        return stats;
    }

    for sample in samples {
        for i in 0..7 {
            stats.mean[i] += sample.features[i];
        }
    }
    for i in 0..7 {
        stats.mean[i] /= n;
    }

    for sample in samples {
        for i in 0..7 {
            let d = sample.features[i] - stats.mean[i];
            stats.std[i] += d * d;
        }
    }
    for i in 0..7 {
        stats.std[i] = (stats.std[i] / n).sqrt();
    }

    stats
}
