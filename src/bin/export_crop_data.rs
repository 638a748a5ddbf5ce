//! Export Crop Conditions Table
//!
//! Dumps the active crop conditions (dataset-derived when a training CSV is
//! present, built-in otherwise) as pretty-printed JSON for frontend or
//! notebook use.
//!
//! Usage:
//!   cargo run --bin export_crop_data [output.json]

use std::fs;
use std::path::Path;

use anyhow::Context;

use crop_recommender_rust::CropData;

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/crop_conditions.json".to_string());
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    let data = CropData::load(Path::new(&data_dir))?;

    // The API payload drops the crop name (the caller already has it), so
    // splice it back in for the standalone export
    let mut entries = Vec::with_capacity(data.conditions().len());
    for conditions in data.conditions() {
        let mut entry = serde_json::Map::new();
        entry.insert("name".to_string(), serde_json::json!(conditions.name));
        if let serde_json::Value::Object(fields) = serde_json::to_value(conditions)? {
            entry.extend(fields);
        }
        entries.push(serde_json::Value::Object(entry));
    }

    if let Some(parent) = Path::new(&output_path).parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(&output_path, &json)
        .with_context(|| format!("Failed to write {}", output_path))?;

    println!("Exported {} crops to {}", entries.len(), output_path);
    Ok(())
}
