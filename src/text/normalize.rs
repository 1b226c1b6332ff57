//! Free text → normalized token string.

use super::lemma::Lemmatizer;
use super::stopwords::is_stopword;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase, keep `[a-z0-9]` and whitespace, split, drop stopwords,
    /// lemmatize, rejoin with single spaces.
    pub fn normalize(&self, text: &str) -> String {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|t| !is_stopword(t))
            .map(|t| self.lemmatizer.lemmatize(t))
            .filter(|t| !is_stopword(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
