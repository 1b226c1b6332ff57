//! netguard-ml — toy threat and SSID strength classifiers.
//!
//! Modular structure:
//! - [`text`] — Normalization: character strip, stopwords, lemmatization
//! - [`features`] — TF-IDF n-gram vectors and SSID feature rows
//! - [`model`] — Random forest classifier and held-out evaluation
//! - [`dataset`] — Synthetic labeled datasets
//! - [`storage`] — Checksummed model artifacts on disk
//! - [`pipeline`] — Training and single-input prediction
//! - [`logging`] — tracing subscriber setup

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod storage;
pub mod text;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use features::{SsidFeatures, TermVector, TfIdfVectorizer};
pub use logging::StructuredLogger;
pub use model::RandomForest;
pub use pipeline::{InputType, SsidDetector, SsidVerdict, ThreatDetector, ThreatLabel, ThreatPrediction};
pub use storage::ArtifactStore;
pub use text::TextNormalizer;
