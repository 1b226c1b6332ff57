//! Artifact storage benchmark: save and verified load of a trained forest.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use netguard_ml::config::SsidConfig;
use netguard_ml::dataset::SsidDataset;
use netguard_ml::pipeline::SsidTrainer;
use netguard_ml::{ArtifactStore, RandomForest};
use tempfile::tempdir;
use uuid::Uuid;

fn bench_save(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let forest = SsidTrainer::new(SsidConfig::default())
        .train(&SsidDataset::build())
        .unwrap();

    c.bench_function("artifact_save_ssid_forest", |b| {
        b.iter(|| store.save("bench.json", "ssid_model", Uuid::nil(), black_box(&forest)).unwrap())
    });
}

fn bench_load(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let forest = SsidTrainer::new(SsidConfig::default())
        .train(&SsidDataset::build())
        .unwrap();
    store.save("bench.json", "ssid_model", Uuid::nil(), &forest).unwrap();

    c.bench_function("artifact_load_ssid_forest", |b| {
        b.iter(|| black_box(store.load::<RandomForest>("bench.json", "ssid_model")).unwrap())
    });
}

criterion_group!(benches, bench_save, bench_load);
criterion_main!(benches);
