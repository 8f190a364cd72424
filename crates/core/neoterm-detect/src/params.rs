//! Detection thresholds.

use neoterm_types::{DEFAULT_MIN_GROWTH, DEFAULT_MIN_TOTAL_MENTIONS, DEFAULT_MIN_YEARS_PRESENT};
use serde::{Deserialize, Serialize};

/// The three thresholds a term must meet to become a candidate.
///
/// All three are necessary conditions. Values are not range-checked: a
/// negative `min_growth` simply accepts every growth ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Minimum length of the longest run of years with mentions.
    pub min_years_present: u32,
    /// Minimum ratio of the peak yearly count to the first-year count.
    pub min_growth: f64,
    /// Minimum number of mentions across all years.
    pub min_total_mentions: u64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            min_years_present: DEFAULT_MIN_YEARS_PRESENT,
            min_growth: DEFAULT_MIN_GROWTH,
            min_total_mentions: DEFAULT_MIN_TOTAL_MENTIONS,
        }
    }
}

impl DetectionParams {
    /// Set the minimum run length.
    pub fn with_min_years_present(mut self, years: u32) -> Self {
        self.min_years_present = years;
        self
    }

    /// Set the minimum growth ratio.
    pub fn with_min_growth(mut self, growth: f64) -> Self {
        self.min_growth = growth;
        self
    }

    /// Set the minimum total mention count.
    pub fn with_min_total_mentions(mut self, mentions: u64) -> Self {
        self.min_total_mentions = mentions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = DetectionParams::default();
        assert_eq!(params.min_years_present, 3);
        assert_eq!(params.min_growth, 1.5);
        assert_eq!(params.min_total_mentions, 3);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let params: DetectionParams = serde_json::from_str(r#"{"min_growth": 2.5}"#).unwrap();
        assert_eq!(params.min_growth, 2.5);
        assert_eq!(params.min_years_present, DEFAULT_MIN_YEARS_PRESENT);
    }
}
