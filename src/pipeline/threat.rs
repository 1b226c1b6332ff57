//! Threat pipeline: TF-IDF n-grams over normalized extension metadata into a
//! class-weighted random forest, and the single-input detector that reuses
//! the fitted vectorizer.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::InputType;
use crate::config::{ThreatConfig, THREAT_DATASET_FILE, THREAT_MODEL_FILE, THREAT_VECTORIZER_FILE};
use crate::dataset::{ThreatDataset, POSITIVE, THREAT_CSV_HEADER};
use crate::error::{Error, Result};
use crate::features::TfIdfVectorizer;
use crate::model::{accuracy, argmax, select_labels, select_rows, train_test_split, ForestParams, RandomForest};
use crate::storage::ArtifactStore;

pub const THREAT_MODEL_KIND: &str = "threat_model";
pub const THREAT_VECTORIZER_KIND: &str = "threat_vectorizer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLabel {
    Safe,
    Malicious,
}

impl ThreatLabel {
    pub fn from_class(class: usize) -> Self {
        if class == POSITIVE {
            ThreatLabel::Malicious
        } else {
            ThreatLabel::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLabel::Safe => "safe",
            ThreatLabel::Malicious => "malicious",
        }
    }
}

/// Fitted vectorizer and forest; only valid together.
#[derive(Debug, Clone)]
pub struct ThreatModel {
    pub vectorizer: TfIdfVectorizer,
    pub forest: RandomForest,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreatTrainingReport {
    pub run_id: Uuid,
    pub samples: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Held-out accuracy; `None` when nothing was held out
    pub accuracy: Option<f64>,
    pub features: usize,
}

pub struct ThreatTrainer {
    config: ThreatConfig,
}

impl ThreatTrainer {
    pub fn new(config: ThreatConfig) -> Self {
        Self { config }
    }

    fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_estimators: self.config.n_estimators,
            max_depth: self.config.max_depth,
            balanced_class_weight: self.config.balanced_class_weight,
            bootstrap: true,
            seed: self.config.seed,
        }
    }

    /// Fit the vectorizer on the whole corpus, fit the forest on the
    /// training split and score it on the held-out split. Accuracy is
    /// reported, never enforced.
    pub fn train(&self, dataset: &ThreatDataset, run_id: Uuid) -> Result<(ThreatModel, ThreatTrainingReport)> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let texts = dataset.combined_texts();
        let labels = dataset.labels();

        let mut vectorizer = TfIdfVectorizer::new(self.config.ngram_min, self.config.ngram_max, self.config.max_features);
        let x = vectorizer.fit_transform(&texts)?;

        let (train_idx, test_idx) = train_test_split(dataset.len(), self.config.test_size, self.config.seed);
        let mut forest = RandomForest::new(self.forest_params());
        forest.fit(select_rows(x.view(), &train_idx).view(), &select_labels(&labels, &train_idx))?;

        let accuracy = if test_idx.is_empty() {
            None
        } else {
            let predicted = forest.predict_batch(select_rows(x.view(), &test_idx).view())?;
            Some(accuracy(&select_labels(&labels, &test_idx), &predicted))
        };

        let report = ThreatTrainingReport {
            run_id,
            samples: dataset.len(),
            train_rows: train_idx.len(),
            test_rows: test_idx.len(),
            accuracy,
            features: vectorizer.vocabulary_size(),
        };
        info!(
            %run_id,
            samples = report.samples,
            train = report.train_rows,
            test = report.test_rows,
            features = report.features,
            accuracy = ?report.accuracy,
            "threat model trained"
        );
        Ok((ThreatModel { vectorizer, forest }, report))
    }

    /// Train, then overwrite the model, vectorizer and dataset dump.
    pub fn train_and_save(&self, dataset: &ThreatDataset, store: &ArtifactStore, run_id: Uuid) -> Result<ThreatTrainingReport> {
        store.write_csv(THREAT_DATASET_FILE, &THREAT_CSV_HEADER, &dataset.csv_records())?;
        let (model, report) = self.train(dataset, run_id)?;
        store.save(THREAT_MODEL_FILE, THREAT_MODEL_KIND, run_id, &model.forest)?;
        store.save(THREAT_VECTORIZER_FILE, THREAT_VECTORIZER_KIND, run_id, &model.vectorizer)?;
        Ok(report)
    }
}

/// Outcome for one raw input
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatPrediction {
    /// Lowercased input as classified
    pub input: String,
    pub input_type: InputType,
    /// Input plus enrichment phrase, before normalization
    pub processed_text: String,
    pub label: ThreatLabel,
    /// Probability of the malicious class in [0, 1]
    pub malicious_probability: f64,
    pub features_used: usize,
    pub model_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatReport {
    pub input: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub prediction: ThreatLabel,
    pub confidence: String,
    pub details: ThreatReportDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatReportDetails {
    pub model_type: String,
    pub features_used: usize,
}

impl ThreatPrediction {
    /// Malicious probability as a percentage with one decimal, e.g. `87.5%`
    pub fn confidence(&self) -> String {
        format!("{:.1}%", self.malicious_probability * 100.0)
    }

    pub fn report(&self) -> ThreatReport {
        ThreatReport {
            input: self.input.clone(),
            input_type: self.input_type,
            prediction: self.label,
            confidence: self.confidence(),
            details: ThreatReportDetails {
                model_type: self.model_type.clone(),
                features_used: self.features_used,
            },
        }
    }
}

pub struct ThreatDetector {
    model: ThreatModel,
}

impl ThreatDetector {
    /// Wrap a fitted pair, checking that the vectorizer feeds the forest
    pub fn new(model: ThreatModel) -> Result<Self> {
        if !model.vectorizer.is_fitted() {
            return Err(Error::NotFitted("TfIdfVectorizer"));
        }
        if !model.forest.is_fitted() {
            return Err(Error::NotFitted("RandomForest"));
        }
        if model.vectorizer.vocabulary_size() != model.forest.n_features() {
            return Err(Error::DimensionMismatch {
                expected: model.forest.n_features(),
                actual: model.vectorizer.vocabulary_size(),
            });
        }
        Ok(Self { model })
    }

    pub fn load(store: &ArtifactStore) -> Result<Self> {
        let (forest, forest_meta) = store.load::<RandomForest>(THREAT_MODEL_FILE, THREAT_MODEL_KIND)?;
        let (vectorizer, vec_meta) = store.load::<TfIdfVectorizer>(THREAT_VECTORIZER_FILE, THREAT_VECTORIZER_KIND)?;
        if forest_meta.run_id != vec_meta.run_id {
            tracing::warn!(
                model_run = %forest_meta.run_id,
                vectorizer_run = %vec_meta.run_id,
                "threat model and vectorizer come from different training runs"
            );
        }
        Self::new(ThreatModel { vectorizer, forest })
    }

    pub fn predict(&self, raw: &str) -> Result<ThreatPrediction> {
        let input = raw.to_lowercase();
        let input_type = InputType::detect(&input);
        let processed_text = input_type.enrich(&input);

        let row = self.model.vectorizer.transform(&processed_text)?;
        let dense = row.to_dense();
        let proba = self.model.forest.predict_proba(dense.view())?;
        let class = argmax(proba.view());
        let malicious_probability = proba.get(POSITIVE).copied().unwrap_or(0.0);
        debug!(%input, %input_type, matched_terms = row.nnz(), malicious_probability, "threat prediction");

        Ok(ThreatPrediction {
            input,
            input_type,
            processed_text,
            label: ThreatLabel::from_class(class),
            malicious_probability,
            features_used: row.dim,
            model_type: self.model.forest.model_type().to_string(),
        })
    }
}
