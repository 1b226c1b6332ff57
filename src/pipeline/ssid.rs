//! SSID pipeline: six handcrafted features into a random forest trained on
//! the whole seed table.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{SsidConfig, SSID_MODEL_FILE};
use crate::dataset::{SsidDataset, POSITIVE};
use crate::error::{Error, Result};
use crate::features::SsidFeatures;
use crate::model::{ForestParams, RandomForest};
use crate::storage::ArtifactStore;

pub const SSID_MODEL_KIND: &str = "ssid_model";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SsidVerdict {
    Weak,
    Secure,
}

impl SsidVerdict {
    pub fn from_class(class: usize) -> Self {
        if class == POSITIVE {
            SsidVerdict::Weak
        } else {
            SsidVerdict::Secure
        }
    }

    /// One-line human verdict for `ssid`
    pub fn sentence(&self, ssid: &str) -> String {
        match self {
            SsidVerdict::Weak => format!("SSID '{}' is likely weak or default.", ssid),
            SsidVerdict::Secure => format!("SSID '{}' appears secure.", ssid),
        }
    }
}

impl fmt::Display for SsidVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SsidVerdict::Weak => f.write_str("weak/default"),
            SsidVerdict::Secure => f.write_str("secure"),
        }
    }
}

pub struct SsidTrainer {
    config: SsidConfig,
}

impl SsidTrainer {
    pub fn new(config: SsidConfig) -> Self {
        Self { config }
    }

    pub fn train(&self, dataset: &SsidDataset) -> Result<RandomForest> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let mut forest = RandomForest::new(ForestParams {
            n_estimators: self.config.n_estimators,
            max_depth: self.config.max_depth,
            balanced_class_weight: false,
            bootstrap: true,
            seed: self.config.seed,
        });
        forest.fit(dataset.feature_matrix().view(), &dataset.labels())?;
        info!(samples = dataset.len(), trees = forest.n_trees(), "ssid model trained");
        Ok(forest)
    }

    pub fn train_and_save(&self, dataset: &SsidDataset, store: &ArtifactStore, run_id: Uuid) -> Result<RandomForest> {
        let forest = self.train(dataset)?;
        store.save(SSID_MODEL_FILE, SSID_MODEL_KIND, run_id, &forest)?;
        Ok(forest)
    }
}

pub struct SsidDetector {
    forest: RandomForest,
}

impl SsidDetector {
    pub fn new(forest: RandomForest) -> Result<Self> {
        if !forest.is_fitted() {
            return Err(Error::NotFitted("RandomForest"));
        }
        if forest.n_features() != SsidFeatures::DIM {
            return Err(Error::DimensionMismatch {
                expected: SsidFeatures::DIM,
                actual: forest.n_features(),
            });
        }
        Ok(Self { forest })
    }

    pub fn load(store: &ArtifactStore) -> Result<Self> {
        let (forest, _) = store.load::<RandomForest>(SSID_MODEL_FILE, SSID_MODEL_KIND)?;
        Self::new(forest)
    }

    pub fn predict(&self, ssid: &str) -> Result<SsidVerdict> {
        let features = SsidFeatures::extract(ssid);
        let class = self.forest.predict(features.to_array().view())?;
        debug!(ssid, ?features, class, "ssid prediction");
        Ok(SsidVerdict::from_class(class))
    }
}
