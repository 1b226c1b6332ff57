//! TF-IDF n-gram vectorizer. The fitted vocabulary and idf weights are
//! persisted alongside the model so prediction-time rows line up with the
//! training matrix.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TermVector;
use crate::error::{Error, Result};
use crate::text::{is_stopword, TextNormalizer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    ngram_min: usize,
    ngram_max: usize,
    max_features: usize,
    /// term -> column index, columns in lexicographic term order
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    n_documents: usize,
    #[serde(skip)]
    normalizer: TextNormalizer,
}

impl TfIdfVectorizer {
    pub fn new(ngram_min: usize, ngram_max: usize, max_features: usize) -> Self {
        let ngram_min = ngram_min.max(1);
        Self {
            ngram_min,
            ngram_max: ngram_max.max(ngram_min),
            max_features,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.n_documents > 0
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Normalize, keep tokens of two or more characters that are not
    /// stopwords, then emit every contiguous n-gram in the configured range.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let normalized = self.normalizer.normalize(document);
        let tokens: Vec<&str> = normalized
            .split(' ')
            .filter(|t| t.chars().count() >= 2 && !is_stopword(t))
            .collect();

        let mut grams = Vec::new();
        for n in self.ngram_min..=self.ngram_max {
            if n > tokens.len() {
                break;
            }
            grams.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        grams
    }

    /// Build the vocabulary (top `max_features` n-grams by corpus frequency)
    /// and the smoothed idf weights.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut term_freq: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let grams = self.analyze(doc);
            let unique: BTreeSet<&String> = grams.iter().collect();
            for g in unique {
                *doc_freq.entry(g.clone()).or_insert(0) += 1;
            }
            for g in grams {
                *term_freq.entry(g).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&String, &usize)> = term_freq.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let kept: BTreeSet<&String> = ranked.into_iter().take(self.max_features).map(|(t, _)| t).collect();

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (idx, term) in kept.into_iter().enumerate() {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            // idf = ln((1 + n) / (1 + df)) + 1
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.clone(), idx);
        }

        debug!(
            candidates = term_freq.len(),
            kept = vocabulary.len(),
            documents = documents.len(),
            "vectorizer fitted"
        );
        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = documents.len();
        Ok(())
    }

    /// Map one document to an L2-normalized TF-IDF row. Out-of-vocabulary
    /// n-grams are ignored.
    pub fn transform(&self, document: &str) -> Result<TermVector> {
        if !self.is_fitted() {
            return Err(Error::NotFitted("TfIdfVectorizer"));
        }

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut indices = Vec::with_capacity(counts.len());
        let mut values = Vec::with_capacity(counts.len());
        for (idx, tf) in counts {
            indices.push(idx);
            values.push(tf * self.idf[idx]);
        }
        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            values.iter_mut().for_each(|v| *v /= norm);
        }

        Ok(TermVector {
            dim: self.vocabulary.len(),
            indices,
            values,
        })
    }

    /// Dense matrix, one row per document
    pub fn transform_batch(&self, documents: &[String]) -> Result<Array2<f64>> {
        let mut out = Array2::zeros((documents.len(), self.vocabulary_size()));
        for (row, doc) in documents.iter().enumerate() {
            let v = self.transform(doc)?;
            for (&i, &val) in v.indices.iter().zip(&v.values) {
                out[[row, i]] = val;
            }
        }
        Ok(out)
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Array2<f64>> {
        self.fit(documents)?;
        self.transform_batch(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "steal user data credential".to_string(),
            "record keyboard input".to_string(),
            "block advertisement web page".to_string(),
            "view pdf document browser".to_string(),
        ]
    }

    #[test]
    fn unfitted_transform_is_an_error() {
        let v = TfIdfVectorizer::new(1, 3, 1000);
        assert!(matches!(v.transform("anything"), Err(Error::NotFitted(_))));
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let mut v = TfIdfVectorizer::new(1, 3, 1000);
        assert!(matches!(v.fit(&[]), Err(Error::EmptyDataset)));
    }

    #[test]
    fn ngrams_span_one_to_three_tokens() {
        let v = TfIdfVectorizer::new(1, 3, 1000);
        let grams = v.analyze("record keyboard input");
        assert_eq!(
            grams,
            vec![
                "record",
                "keyboard",
                "input",
                "record keyboard",
                "keyboard input",
                "record keyboard input"
            ]
        );
    }

    #[test]
    fn vocabulary_is_capped_and_sorted() {
        let mut v = TfIdfVectorizer::new(1, 3, 5);
        v.fit(&corpus()).unwrap();
        assert_eq!(v.vocabulary_size(), 5);
        let names: Vec<&str> = v.feature_names().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn rows_are_unit_length_and_oov_is_dropped() {
        let mut v = TfIdfVectorizer::new(1, 3, 1000);
        v.fit(&corpus()).unwrap();
        let row = v.transform("Steals user DATA and unseen tokens").unwrap();
        assert_eq!(row.dim, v.vocabulary_size());
        let norm: f64 = row.values.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(row.get(v.term_index("steal").unwrap()) > 0.0);
        assert!(v.term_index("unseen").is_none());

        let empty = v.transform("nothing known here").unwrap();
        assert_eq!(empty.nnz(), 0);
        assert_eq!(empty.dim, v.vocabulary_size());
    }

    #[test]
    fn transform_is_deterministic() {
        let mut v = TfIdfVectorizer::new(1, 3, 1000);
        v.fit(&corpus()).unwrap();
        let a = v.transform("view pdf document in the browser").unwrap();
        let b = v.transform("view pdf document in the browser").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serde_roundtrip_preserves_transform() {
        let mut v = TfIdfVectorizer::new(1, 3, 1000);
        v.fit(&corpus()).unwrap();
        let text = serde_json::to_string(&v).unwrap();
        let restored: TfIdfVectorizer = serde_json::from_str(&text).unwrap();
        assert_eq!(
            v.transform("block web page").unwrap(),
            restored.transform("block web page").unwrap()
        );
    }
}
