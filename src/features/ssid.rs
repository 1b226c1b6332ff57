//! SSID feature extraction. Dataset construction and single-input
//! prediction both go through [`SsidFeatures::extract`], so the six fields
//! are computed by one rule set in one order.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Default or vendor-shipped names, compared lowercase and exact
pub const COMMON_SSIDS: &[&str] = &["home", "wifi", "default", "netgear", "linksys", "tp-link"];

/// Vendor name fragments, compared uppercase as prefixes
pub const MANUFACTURER_PREFIXES: &[&str] = &["TP-LINK", "NETGEAR", "D-LINK", "MI", "JIOFI", "TENDA"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsidFeatures {
    pub length: usize,
    pub has_special: bool,
    pub has_digit: bool,
    pub has_upper: bool,
    pub is_common: bool,
    pub is_manufacturer: bool,
}

impl SsidFeatures {
    /// Column order of [`SsidFeatures::to_array`]
    pub const NAMES: [&'static str; 6] = [
        "length",
        "has_special",
        "has_digit",
        "has_upper",
        "is_common",
        "is_manufacturer",
    ];
    pub const DIM: usize = Self::NAMES.len();

    pub fn extract(ssid: &str) -> Self {
        let lower = ssid.to_lowercase();
        let upper = ssid.to_uppercase();
        Self {
            length: ssid.chars().count(),
            has_special: ssid.chars().any(|c| !c.is_ascii_alphanumeric()),
            has_digit: ssid.chars().any(char::is_numeric),
            has_upper: ssid.chars().any(char::is_uppercase),
            is_common: COMMON_SSIDS.contains(&lower.as_str()),
            is_manufacturer: MANUFACTURER_PREFIXES.iter().any(|p| upper.starts_with(p)),
        }
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(vec![
            self.length as f64,
            f64::from(u8::from(self.has_special)),
            f64::from(u8::from(self.has_digit)),
            f64::from(u8::from(self.has_upper)),
            f64::from(u8::from(self.is_common)),
            f64::from(u8::from(self.is_manufacturer)),
        ])
    }
}
