//! Synthetic labeled datasets. Rows are fixed at build time and never change.

mod ssid;
mod threat;

pub use ssid::{SsidDataset, SsidSample, STRONG_SSIDS, WEAK_SSIDS};
pub use threat::{ThreatDataset, ThreatSample, THREAT_CSV_HEADER};

/// Label value for the positive class (malicious / weak)
pub const POSITIVE: usize = 1;
/// Label value for the negative class (safe / secure)
pub const NEGATIVE: usize = 0;
