//! Generate Synthetic Training Dataset
//!
//! Samples each built-in crop's optimal intervals uniformly and writes the
//! rows as a training CSV the recommender can load. Useful for running the
//! KNN path without the public dataset.
//!
//! Usage:
//!   cargo run --bin generate_sample_dataset [rows_per_crop]

use std::fs;
use std::path::Path;
use std::time::Instant;

use polars::prelude::*;
use rand::Rng;

use crop_recommender_rust::data::DATASET_FILE;
use crop_recommender_rust::params::SoilParameter;
use crop_recommender_rust::default_crop_conditions;

const DEFAULT_ROWS_PER_CROP: usize = 100;

fn main() -> anyhow::Result<()> {
    println!("\n{}", "=".repeat(70));
    println!("Synthetic Training Dataset Generator");
    println!("{}", "=".repeat(70));
    println!();

    let rows_per_crop: usize = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(DEFAULT_ROWS_PER_CROP);

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    fs::create_dir_all(&data_dir)?;
    let csv_path = Path::new(&data_dir).join(DATASET_FILE);

    let crops = default_crop_conditions();
    println!("Crops: {}", crops.len());
    println!("Rows per crop: {}", rows_per_crop);
    println!("Output: {}\n", csv_path.display());

    let start = Instant::now();
    let mut rng = rand::thread_rng();

    // N, P, K are integer-valued in the public dataset; the rest keep full
    // float precision
    let mut n_col: Vec<i64> = Vec::with_capacity(crops.len() * rows_per_crop);
    let mut p_col: Vec<i64> = Vec::with_capacity(crops.len() * rows_per_crop);
    let mut k_col: Vec<i64> = Vec::with_capacity(crops.len() * rows_per_crop);
    let mut temperature_col: Vec<f64> = Vec::with_capacity(crops.len() * rows_per_crop);
    let mut humidity_col: Vec<f64> = Vec::with_capacity(crops.len() * rows_per_crop);
    let mut ph_col: Vec<f64> = Vec::with_capacity(crops.len() * rows_per_crop);
    let mut rainfall_col: Vec<f64> = Vec::with_capacity(crops.len() * rows_per_crop);
    let mut labels: Vec<String> = Vec::with_capacity(crops.len() * rows_per_crop);

    for crop in &crops {
        for _ in 0..rows_per_crop {
            let mut row = [0.0; 7];
            for (i, param) in SoilParameter::ALL.iter().enumerate() {
                let (min, max) = crop.interval(*param);
                row[i] = rng.gen_range(min..=max);
            }

            n_col.push(row[0].round() as i64);
            p_col.push(row[1].round() as i64);
            k_col.push(row[2].round() as i64);
            temperature_col.push(row[3]);
            humidity_col.push(row[4]);
            ph_col.push(row[5]);
            rainfall_col.push(row[6]);
            labels.push(crop.name.clone());
        }
    }

    let mut df = df!(
        "N" => n_col,
        "P" => p_col,
        "K" => k_col,
        "temperature" => temperature_col,
        "humidity" => humidity_col,
        "ph" => ph_col,
        "rainfall" => rainfall_col,
        "label" => labels,
    )?;

    let file = fs::File::create(&csv_path)?;
    CsvWriter::new(file).finish(&mut df)?;

    let elapsed = start.elapsed();
    let size_kb = fs::metadata(&csv_path)?.len() as f64 / 1024.0;

    println!("Written: {} rows ({:.1} KB, {:.3} ms)", df.height(), size_kb, elapsed.as_secs_f64() * 1000.0);
    println!("\nDataset ready. Start the server or rerun the tests to pick it up.\n");

    Ok(())
}
