//! Training and single-input prediction for both classifiers.
//!
//! Detectors are loaded once from an [`ArtifactStore`](crate::storage::ArtifactStore)
//! and passed by reference to each prediction; nothing is held in process
//! globals.

mod input;
mod ssid;
mod threat;

pub use input::InputType;
pub use ssid::{SsidDetector, SsidTrainer, SsidVerdict, SSID_MODEL_KIND};
pub use threat::{
    ThreatDetector, ThreatLabel, ThreatModel, ThreatPrediction, ThreatReport, ThreatReportDetails,
    ThreatTrainer, ThreatTrainingReport, THREAT_MODEL_KIND, THREAT_VECTORIZER_KIND,
};
