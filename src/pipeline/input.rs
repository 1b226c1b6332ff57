//! Surface typing of a bare threat input and the fixed phrase appended to it.
//!
//! The appended phrase is the same for every input of a type, so it weighs
//! on the prediction at least as much as the name itself does.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Executable and package suffixes
const EXTENSION_SUFFIXES: &[&str] = &[
    "xpi", "dll", "so", "exe", "crx", "js", "py", "jar", "bin", "sh", "bat", "cmd",
];

const DOMAIN_SUFFIXES: &[&str] = &[
    "com", "org", "net", "xyz", "tech", "site", "io", "gov", "edu", "info", "biz", "co", "us",
    "uk", "ca",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Extension,
    Domain,
    Unknown,
}

fn has_suffix(input: &str, suffixes: &[&str]) -> bool {
    let Some((_, last)) = input.rsplit_once('.') else {
        return false;
    };
    suffixes.iter().any(|s| last.eq_ignore_ascii_case(s))
}

impl InputType {
    /// Classify by the final `.suffix`, case-insensitive; extensions win over domains
    pub fn detect(input: &str) -> Self {
        if has_suffix(input, EXTENSION_SUFFIXES) {
            InputType::Extension
        } else if has_suffix(input, DOMAIN_SUFFIXES) {
            InputType::Domain
        } else {
            InputType::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Extension => "extension",
            InputType::Domain => "domain",
            InputType::Unknown => "unknown",
        }
    }

    pub fn enrichment(&self) -> &'static str {
        match self {
            InputType::Extension => "extension plugin addon browser chrome firefox",
            InputType::Domain => "website url domain internet web",
            InputType::Unknown => "unknown suspicious threat",
        }
    }

    /// `input` followed by the type's descriptive phrase
    pub fn enrich(&self, input: &str) -> String {
        format!("{} {}", input, self.enrichment())
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
