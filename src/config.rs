//! Pipeline configuration. Defaults reproduce the reference training setup;
//! a JSON file only needs the fields it wants to override.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env var naming the JSON config file read by the binaries
pub const CONFIG_PATH_ENV: &str = "NETGUARD_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "netguard.json";

pub const THREAT_MODEL_FILE: &str = "threat_model.json";
pub const THREAT_VECTORIZER_FILE: &str = "threat_vectorizer.json";
pub const SSID_MODEL_FILE: &str = "ssid_model.json";
pub const THREAT_DATASET_FILE: &str = "threat_dataset.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the persisted models and the dataset dump
    pub artifact_dir: PathBuf,
    pub threat: ThreatConfig,
    pub ssid: SsidConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    /// Vocabulary cap for the n-gram vectorizer
    pub max_features: usize,
    pub ngram_min: usize,
    pub ngram_max: usize,
    /// Held-out fraction (0.0–1.0)
    pub test_size: f64,
    pub seed: u64,
    pub balanced_class_weight: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SsidConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("models"),
            threat: ThreatConfig::default(),
            ssid: SsidConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            max_depth: Some(10),
            max_features: 1000,
            ngram_min: 1,
            ngram_max: 3,
            test_size: 0.3,
            seed: 42,
            balanced_class_weight: true,
        }
    }
}

impl Default for SsidConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            seed: 42,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PipelineConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<PipelineConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    /// Resolve the config path from the environment and load it
    pub fn from_env() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load(&path)
    }
}
