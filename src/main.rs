//! Training entrypoint: rebuilds both synthetic datasets, retrains both
//! models and overwrites every artifact in the configured directory.

use anyhow::Context;
use netguard_ml::{
    config::PipelineConfig,
    dataset::{SsidDataset, ThreatDataset},
    logging::StructuredLogger,
    pipeline::{SsidTrainer, ThreatTrainer},
    storage::ArtifactStore,
};
use tracing::info;
use uuid::Uuid;

fn main() -> anyhow::Result<()> {
    let config = PipelineConfig::from_env();
    StructuredLogger::init(config.log.json, &config.log.level);

    let run_id = Uuid::new_v4();
    let store = ArtifactStore::new(&config.artifact_dir);
    info!(%run_id, artifact_dir = %store.dir().display(), "training run starting");

    println!("Training SSID strength model...");
    SsidTrainer::new(config.ssid.clone())
        .train_and_save(&SsidDataset::build(), &store, run_id)
        .context("SSID training failed")?;
    println!("SSID model trained and saved");

    println!("\nTraining threat detection model...");
    let report = ThreatTrainer::new(config.threat.clone())
        .train_and_save(&ThreatDataset::build(), &store, run_id)
        .context("threat training failed")?;

    println!("\nThreat Detection Model Evaluation:");
    match report.accuracy {
        Some(acc) => println!("Accuracy: {:.2}%", acc * 100.0),
        None => println!("Accuracy: n/a (no held-out rows)"),
    }
    println!("Features used: {}", report.features);
    println!("Model saved with vectorizer");

    info!(%run_id, "training run complete");
    Ok(())
}
