use criterion::{black_box, criterion_group, criterion_main, Criterion};

use crop_recommender_rust::data::{CropData, TrainingSample};
use crop_recommender_rust::{
    default_crop_conditions, normalize, normalize_interval, top_k, CropRecommender, SoilReading,
};

fn normalizer_benchmark(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| black_box(normalize(black_box(87.3), 0.0, 140.0)))
    });

    c.bench_function("normalize_interval", |b| {
        b.iter(|| black_box(normalize_interval(black_box(60.0), black_box(100.0), 0.0, 140.0)))
    });
}

fn top_k_benchmark(c: &mut Criterion) {
    // One score per crop in the built-in table, mixed magnitudes
    let scores: Vec<(String, f64)> = default_crop_conditions()
        .iter()
        .enumerate()
        .map(|(i, crop)| (crop.name.clone(), (i as f64 * 37.0) % 100.0))
        .collect();

    c.bench_function("top_k of 22", |b| b.iter(|| black_box(top_k(&scores, 5))));
}

/// Deterministic stand-in for the training dataset: rows spread around each
/// crop's interval midpoints.
fn synthetic_data(rows_per_crop: usize) -> CropData {
    let crops = default_crop_conditions();
    let mut samples = Vec::with_capacity(crops.len() * rows_per_crop);

    for conditions in &crops {
        let mids = conditions.midpoints();
        for row in 0..rows_per_crop {
            let mut features = mids;
            for (i, feature) in features.iter_mut().enumerate() {
                let spread = (row as f64 / rows_per_crop as f64) - 0.5;
                *feature += spread * (1.0 + i as f64 * 0.1);
            }
            samples.push(TrainingSample { features, crop: conditions.name.clone() });
        }
    }

    CropData::from_samples(samples)
}

fn recommend_benchmark(c: &mut Criterion) {
    // 2200 rows, the size of the public dataset
    let recommender = CropRecommender::from_data(synthetic_data(100));
    let paddy = SoilReading::new([90.0, 42.0, 43.0, 20.88, 82.0, 6.5, 202.94]);

    c.bench_function("recommend (knn scan, 2200 rows)", |b| {
        b.iter(|| black_box(recommender.recommend(black_box(&paddy))))
    });

    let table_only = CropRecommender::from_data(CropData::from_builtin());
    c.bench_function("recommend (table fallback)", |b| {
        b.iter(|| black_box(table_only.recommend(black_box(&paddy))))
    });
}

criterion_group!(benches, normalizer_benchmark, top_k_benchmark, recommend_benchmark);
criterion_main!(benches);
