//! Classify one extension filename or domain name with the persisted threat
//! model and print the result as JSON.

use anyhow::Context;
use clap::Parser;
use netguard_ml::{config::PipelineConfig, logging::StructuredLogger, storage::ArtifactStore, ThreatDetector};

#[derive(Parser, Debug)]
#[command(name = "predict-extension", about = "Classify an extension filename or domain as malicious or safe")]
struct Args {
    /// Extension filename (e.g. `helper.xpi`) or domain (e.g. `evil.com`)
    target: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = PipelineConfig::from_env();
    StructuredLogger::init(config.log.json, &config.log.level);

    let store = ArtifactStore::new(&config.artifact_dir);
    let detector = ThreatDetector::load(&store).context("Failed to load model")?;

    let prediction = detector.predict(&args.target).context("Prediction failed")?;
    println!("Detected type: {}", prediction.input_type);
    println!("Processed text: {}", prediction.processed_text);

    let mut stdout = std::io::stdout().lock();
    StructuredLogger::emit_json(&prediction.report(), &mut stdout)?;
    Ok(())
}
