//! Feature extraction: sparse TF-IDF n-gram vectors for threat text, fixed
//! six-field vectors for SSIDs.

mod ssid;
mod tfidf;

pub use ssid::{SsidFeatures, COMMON_SSIDS, MANUFACTURER_PREFIXES};
pub use tfidf::TfIdfVectorizer;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Sparse row under a frozen vocabulary; `indices` are sorted and unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermVector {
    pub dim: usize,
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl TermVector {
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn to_dense(&self) -> Array1<f64> {
        let mut out = Array1::zeros(self.dim);
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            out[i] = v;
        }
        out
    }
}
