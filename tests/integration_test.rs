//! Integration test: config load, dataset build, training, artifact round
//! trip, single-input prediction for both pipelines.

use netguard_ml::{
    config::{PipelineConfig, SsidConfig, ThreatConfig, SSID_MODEL_FILE, THREAT_DATASET_FILE},
    dataset::{SsidDataset, ThreatDataset},
    features::{SsidFeatures, TfIdfVectorizer},
    model::{select_rows, train_test_split},
    pipeline::{InputType, SsidDetector, SsidTrainer, SsidVerdict, ThreatDetector, ThreatLabel, ThreatTrainer},
    storage::ArtifactStore,
    text::TextNormalizer,
    Error,
};
use std::path::Path;
use uuid::Uuid;

fn quick_threat_config() -> ThreatConfig {
    ThreatConfig {
        n_estimators: 40,
        ..ThreatConfig::default()
    }
}

#[test]
fn config_load_default() {
    let c = PipelineConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.threat.n_estimators, 200);
    assert_eq!(c.threat.max_depth, Some(10));
    assert_eq!(c.ssid.n_estimators, 100);
    assert_eq!(c.artifact_dir, Path::new("models"));
}

#[test]
fn normalization_is_idempotent_over_dataset() {
    let n = TextNormalizer::new();
    for sample in ThreatDataset::build().samples {
        assert_eq!(n.normalize(&sample.combined), sample.combined);
    }
}

#[test]
fn fitted_vectorizer_is_deterministic() {
    let dataset = ThreatDataset::build();
    let mut v = TfIdfVectorizer::new(1, 3, 1000);
    v.fit(&dataset.combined_texts()).unwrap();
    let text = "malicious_0.xpi extension plugin addon browser chrome firefox";
    assert_eq!(v.transform(text).unwrap(), v.transform(text).unwrap());
}

#[test]
fn seeded_training_is_reproducible() {
    let dataset = ThreatDataset::build();
    let trainer = ThreatTrainer::new(quick_threat_config());
    let (a, report_a) = trainer.train(&dataset, Uuid::new_v4()).unwrap();
    let (b, report_b) = trainer.train(&dataset, Uuid::new_v4()).unwrap();
    assert_eq!(report_a.accuracy, report_b.accuracy);

    let x = a.vectorizer.transform_batch(&dataset.combined_texts()).unwrap();
    let (_, test) = train_test_split(dataset.len(), 0.3, 42);
    let held_out = select_rows(x.view(), &test);
    assert_eq!(
        a.forest.predict_batch(held_out.view()).unwrap(),
        b.forest.predict_batch(held_out.view()).unwrap()
    );
    for row in held_out.rows() {
        assert_eq!(a.forest.predict_proba(row).unwrap(), b.forest.predict_proba(row).unwrap());
    }
}

#[test]
fn detect_type_examples() {
    assert_eq!(InputType::detect("foo.xpi"), InputType::Extension);
    assert_eq!(InputType::detect("evil.com"), InputType::Domain);
    assert_eq!(InputType::detect("randomword"), InputType::Unknown);
}

#[test]
fn ssid_feature_examples() {
    let f = SsidFeatures::extract("HOME123");
    assert_eq!(f.to_array().to_vec(), vec![7.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    assert!(SsidFeatures::extract("wifi").is_common);
}

#[test]
fn ssid_end_to_end_through_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    SsidTrainer::new(SsidConfig::default())
        .train_and_save(&SsidDataset::build(), &store, Uuid::new_v4())
        .unwrap();
    assert!(store.path(SSID_MODEL_FILE).exists());

    let detector = SsidDetector::load(&store).unwrap();
    assert_eq!(detector.predict("TP-LINK123").unwrap(), SsidVerdict::Weak);
    assert_eq!(detector.predict("X1z9_aQ#1").unwrap(), SsidVerdict::Secure);
    assert_eq!(
        detector.predict("TP-LINK123").unwrap().sentence("TP-LINK123"),
        "SSID 'TP-LINK123' is likely weak or default."
    );
}

#[test]
fn threat_end_to_end_through_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("models"));
    let report = ThreatTrainer::new(quick_threat_config())
        .train_and_save(&ThreatDataset::build(), &store, Uuid::new_v4())
        .unwrap();

    let csv = std::fs::read_to_string(store.path(THREAT_DATASET_FILE)).unwrap();
    assert_eq!(csv.lines().count(), 101);
    assert!(csv.starts_with("name,permissions,description,label,combined\n"));
    assert!(csv.contains("malicious_0.xpi,\"tabs,debugger,webRequest,downloads\","));

    let detector = ThreatDetector::load(&store).unwrap();
    let p = detector
        .predict("malicious_0.xpi tabs,debugger,webRequest,downloads steals user data and credentials")
        .unwrap();
    assert_eq!(p.label, ThreatLabel::Malicious);
    assert!(p.malicious_probability > 0.5);
    assert_eq!(p.features_used, report.features);
}

/// A bare filename carries one in-vocabulary token; the rest of the row
/// comes from the fixed enrichment phrase, whose only known term belongs to
/// the benign pdf-viewer rows. The phrase decides, not the name.
#[test]
fn bare_extension_names_follow_the_enrichment_phrase() {
    let dataset = ThreatDataset::build();
    let (model, report) = ThreatTrainer::new(quick_threat_config()).train(&dataset, Uuid::nil()).unwrap();
    let detector = ThreatDetector::new(model).unwrap();

    let p = detector.predict("Malicious_0.XPI").unwrap();
    assert_eq!(p.input, "malicious_0.xpi");
    assert_eq!(p.input_type, InputType::Extension);
    assert_eq!(
        p.processed_text,
        "malicious_0.xpi extension plugin addon browser chrome firefox"
    );
    assert_eq!(p.features_used, report.features);
    let json = serde_json::to_value(p.report()).unwrap();
    assert_eq!(json["type"], "extension");
    assert!(json["confidence"].as_str().unwrap().ends_with('%'));

    let names = ["malicious_0.xpi", "keylogger_0.dll", "adblock_0.xpi"];
    let probabilities: Vec<f64> = names
        .iter()
        .map(|name| {
            let p = detector.predict(name).unwrap();
            assert_eq!(p.label, ThreatLabel::Safe, "{name}");
            p.malicious_probability
        })
        .collect();
    let max = probabilities.iter().copied().fold(f64::MIN, f64::max);
    let min = probabilities.iter().copied().fold(f64::MAX, f64::min);
    assert!(max - min < 0.05, "{probabilities:?}");
}

#[test]
fn missing_artifacts_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    assert!(matches!(ThreatDetector::load(&store), Err(Error::ArtifactMissing(_))));
    assert!(matches!(SsidDetector::load(&store), Err(Error::ArtifactMissing(_))));
}

#[test]
fn corrupt_artifact_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    SsidTrainer::new(SsidConfig::default())
        .train_and_save(&SsidDataset::build(), &store, Uuid::new_v4())
        .unwrap();
    let path = store.path(SSID_MODEL_FILE);
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    assert!(matches!(SsidDetector::load(&store), Err(Error::ArtifactCorrupt { .. })));
}
