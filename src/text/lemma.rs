//! Noun lemmatizer: irregular-form table plus plural suffix rules.
//!
//! Reduction is repeated until the word stops changing, so every output is a
//! fixed point and lemmatizing twice equals lemmatizing once.

use std::collections::HashMap;
use std::sync::LazyLock;

static IRREGULAR: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("analyses", "analysis"),
        ("viruses", "virus"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
    ]
    .into_iter()
    .collect()
});

/// Words that end in `s` but are already base forms
const INVARIANT: &[&str] = &[
    "data", "news", "series", "species", "physics", "mathematics", "analytics", "always",
    "perhaps", "whereas", "https", "windows",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn new() -> Self {
        Lemmatizer
    }

    pub fn lemmatize(&self, word: &str) -> String {
        let mut current = word.to_string();
        // Each pass either shortens the word or maps it out of the irregular table.
        for _ in 0..=word.len() {
            let next = Self::reduce_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn reduce_once(word: &str) -> String {
        if let Some(base) = IRREGULAR.get(word) {
            return (*base).to_string();
        }
        if word.len() <= 3 || INVARIANT.contains(&word) {
            return word.to_string();
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }
        if word.ends_with("sses") {
            return word[..word.len() - 2].to_string();
        }
        if word.ends_with("ies") && word.len() > 4 {
            return format!("{}y", &word[..word.len() - 3]);
        }
        for suffix in ["xes", "ches", "shes", "zes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        if let Some(stem) = word.strip_suffix('s') {
            return stem.to_string();
        }
        word.to_string()
    }
}
