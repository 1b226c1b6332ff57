//! SSID strength samples: hand-labeled weak and strong seeds.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{NEGATIVE, POSITIVE};
use crate::features::SsidFeatures;

pub const WEAK_SSIDS: &[&str] = &[
    "HOME123",
    "wifi2020",
    "TP-LINK123",
    "netgear",
    "admin1",
    "password123",
    "jiofi2023",
];

pub const STRONG_SSIDS: &[&str] = &[
    "Phoenix_9823",
    "SecureNet_77",
    "MyPrivateLAN",
    "OrangeJuice_X",
    "X1z9_aQ#1",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsidSample {
    pub ssid: String,
    pub features: SsidFeatures,
    pub label: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsidDataset {
    pub samples: Vec<SsidSample>,
}

impl SsidDataset {
    pub fn build() -> Self {
        let weak = WEAK_SSIDS.iter().map(|s| (*s, POSITIVE));
        let strong = STRONG_SSIDS.iter().map(|s| (*s, NEGATIVE));
        let samples = weak
            .chain(strong)
            .map(|(ssid, label)| SsidSample {
                ssid: ssid.to_string(),
                features: SsidFeatures::extract(ssid),
                label,
            })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// One row per sample, columns in `SsidFeatures::NAMES` order
    pub fn feature_matrix(&self) -> Array2<f64> {
        let mut x = Array2::zeros((self.samples.len(), SsidFeatures::DIM));
        for (mut row, sample) in x.rows_mut().into_iter().zip(&self.samples) {
            row.assign(&sample.features.to_array());
        }
        x
    }

    pub fn labels(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.label).collect()
    }
}
