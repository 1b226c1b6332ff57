//! Judge one SSID as weak/default or secure with the persisted SSID model.

use anyhow::Context;
use clap::Parser;
use netguard_ml::{config::PipelineConfig, logging::StructuredLogger, storage::ArtifactStore, SsidDetector};

#[derive(Parser, Debug)]
#[command(name = "predict-ssid", about = "Check whether a Wi-Fi network name looks weak or default")]
struct Args {
    /// Network name as broadcast
    ssid: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = PipelineConfig::from_env();
    StructuredLogger::init(config.log.json, &config.log.level);

    let store = ArtifactStore::new(&config.artifact_dir);
    let detector = SsidDetector::load(&store).context("Failed to load model")?;
    let verdict = detector.predict(&args.ssid).context("Prediction failed")?;
    println!("{}", verdict.sentence(&args.ssid));
    Ok(())
}
