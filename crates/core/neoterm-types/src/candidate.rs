//! Emerging-term candidates and the yearly count tables they are built from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{TermId, Year};

/// Mention counts of one term, keyed by year.
pub type YearlyCounts = BTreeMap<Year, u64>;

/// Mention counts of every eligible term.
pub type YearlyCountTable = BTreeMap<TermId, YearlyCounts>;

/// Inclusive range of publication years covered by a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// First year (inclusive).
    pub start: Year,
    /// Last year (inclusive).
    pub end: Year,
}

impl YearRange {
    /// Create a range. Returns `None` when `end < start`.
    pub fn new(start: Year, end: Year) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Iterate over every year in the range.
    pub fn years(&self) -> impl Iterator<Item = Year> {
        self.start..=self.end
    }

    /// Number of years in the range.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// A valid range always holds at least one year.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the year falls inside the range.
    pub fn contains(&self, year: Year) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A term judged to be emerging, with its trajectory summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Term this candidate describes; at most one candidate per term.
    pub term_id: TermId,
    /// First year with any mention.
    pub first_year: Year,
    /// Last year with any mention.
    pub last_year: Year,
    /// Start of the longest unbroken run of non-zero years.
    pub first_stable_year: Year,
    /// Length of that run, in years.
    pub max_consecutive: u32,
    /// Peak yearly count divided by the first-year count (0 if that count is 0).
    pub growth: f64,
    /// Sum of counts across all years.
    pub total_mentions: u64,
    /// Full yearly histogram.
    pub counts_per_year: YearlyCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range() {
        let range = YearRange::new(2010, 2014).unwrap();
        assert_eq!(range.len(), 5);
        assert_eq!(range.years().collect::<Vec<_>>(), vec![2010, 2011, 2012, 2013, 2014]);
        assert!(range.contains(2012));
        assert!(!range.contains(2015));
        assert_eq!(range.to_string(), "2010-2014");
    }

    #[test]
    fn test_year_range_rejects_inverted_bounds() {
        assert!(YearRange::new(2015, 2014).is_none());
        assert_eq!(YearRange::new(2014, 2014).map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_candidate_counts_serialize_as_object() {
        let candidate = Candidate {
            term_id: 7,
            first_year: 2010,
            last_year: 2011,
            first_stable_year: 2010,
            max_consecutive: 2,
            growth: 2.0,
            total_mentions: 3,
            counts_per_year: [(2010, 1), (2011, 2)].into_iter().collect(),
        };
        let json = serde_json::to_string(&candidate.counts_per_year).unwrap();
        assert_eq!(json, r#"{"2010":1,"2011":2}"#);
    }
}
