//! Inspect the training dataset the recommender would load.
//!
//! Usage:
//!   cargo run --bin inspect_dataset

use std::path::Path;

use rustc_hash::FxHashMap;

use crop_recommender_rust::data::FEATURE_COLUMNS;
use crop_recommender_rust::CropData;

fn main() -> anyhow::Result<()> {
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let data = CropData::load(Path::new(&data_dir))?;

    println!("\n=== INSPECTING TRAINING DATASET ===\n");

    if data.samples.is_empty() {
        println!("No dataset loaded; the engine would run on the built-in crop table.");
        println!("Crops in table: {}", data.conditions().len());
        return Ok(());
    }

    println!("Samples: {}", data.samples.len());
    println!("Crops:   {}", data.conditions().len());

    // Column statistics the KNN query normalization uses
    if let Some(stats) = &data.stats {
        println!("\nColumn statistics (mean / std):");
        for (i, name) in FEATURE_COLUMNS.iter().enumerate() {
            println!("  {:<12} {:>10.3} / {:<10.3}", name, stats.mean[i], stats.std[i]);
        }
    }

    // Row counts per label, in table order
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for sample in &data.samples {
        *counts.entry(sample.crop.as_str()).or_default() += 1;
    }

    println!("\nRows and derived nitrogen interval per crop:");
    for conditions in data.conditions() {
        let count = counts.get(conditions.name.as_str()).copied().unwrap_or(0);
        println!(
            "  {:<14} {:>5} rows   N [{:.1}, {:.1}]",
            conditions.name, count, conditions.n_min, conditions.n_max
        );
    }

    println!();
    Ok(())
}
