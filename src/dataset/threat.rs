//! Browser-extension threat samples: four templates, 25 rows each.

use serde::{Deserialize, Serialize};

use super::{NEGATIVE, POSITIVE};
use crate::text::TextNormalizer;

pub const THREAT_CSV_HEADER: [&str; 5] = ["name", "permissions", "description", "label", "combined"];

const PER_TEMPLATE: usize = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatSample {
    pub name: String,
    pub permissions: String,
    pub description: String,
    pub label: usize,
    /// Normalized `name permissions description`
    pub combined: String,
}

impl ThreatSample {
    pub fn new(
        normalizer: &TextNormalizer,
        name: String,
        permissions: &str,
        description: &str,
        label: usize,
    ) -> Self {
        let combined = normalizer.normalize(&format!("{} {} {}", name, permissions, description));
        Self {
            name,
            permissions: permissions.to_string(),
            description: description.to_string(),
            label,
            combined,
        }
    }

    pub fn csv_record(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.permissions.clone(),
            self.description.clone(),
            self.label.to_string(),
            self.combined.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatDataset {
    pub samples: Vec<ThreatSample>,
}

impl ThreatDataset {
    /// 50 malicious rows (`malicious_i.xpi`, `keylogger_i.dll`) followed by
    /// 50 benign rows (`adblock_i.xpi`, `pdfviewer_i.so`), interleaved per index.
    pub fn build() -> Self {
        let n = TextNormalizer::new();
        let mut samples = Vec::with_capacity(PER_TEMPLATE * 4);
        for i in 0..PER_TEMPLATE {
            samples.push(ThreatSample::new(
                &n,
                format!("malicious_{i}.xpi"),
                "tabs,debugger,webRequest,downloads",
                "steals user data and credentials",
                POSITIVE,
            ));
            samples.push(ThreatSample::new(
                &n,
                format!("keylogger_{i}.dll"),
                "input,processes,system",
                "records all keyboard inputs",
                POSITIVE,
            ));
        }
        for i in 0..PER_TEMPLATE {
            samples.push(ThreatSample::new(
                &n,
                format!("adblock_{i}.xpi"),
                "webRequest,storage",
                "blocks advertisements on web pages",
                NEGATIVE,
            ));
            samples.push(ThreatSample::new(
                &n,
                format!("pdfviewer_{i}.so"),
                "pdfs,printing",
                "views pdf documents in browser",
                NEGATIVE,
            ));
        }
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn combined_texts(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.combined.clone()).collect()
    }

    pub fn labels(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.label).collect()
    }

    pub fn csv_records(&self) -> Vec<Vec<String>> {
        self.samples.iter().map(ThreatSample::csv_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_balanced_rows() {
        let d = ThreatDataset::build();
        assert_eq!(d.len(), 100);
        assert_eq!(d.labels().iter().filter(|&&l| l == POSITIVE).count(), 50);
        assert_eq!(d.samples[0].name, "malicious_0.xpi");
        assert_eq!(d.samples[1].name, "keylogger_0.dll");
        assert_eq!(d.samples[50].name, "adblock_0.xpi");
        assert_eq!(d.samples[99].name, "pdfviewer_24.so");
    }

    #[test]
    fn combined_is_normalized() {
        let d = ThreatDataset::build();
        assert_eq!(
            d.samples[1].combined,
            "keylogger0dll inputprocessessystem record keyboard input"
        );
        assert_eq!(
            d.samples[51].combined,
            "pdfviewer0so pdfsprinting view pdf document browser"
        );
    }
}
