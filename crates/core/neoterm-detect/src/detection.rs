//! Emerging-term classification.
//!
//! Every term is judged on a dense yearly vector spanning the whole corpus
//! range, so a year without mentions breaks a run even when the count table
//! has no entry for it.

use neoterm_types::{Candidate, TermId, Year, YearRange, YearlyCountTable, YearlyCounts};

use crate::error::{DetectError, DetectResult};
use crate::params::DetectionParams;

/// Build a corpus year range from its bounds.
///
/// # Returns
/// * `Ok(YearRange)` when `start <= end`
/// * `Err(DetectError::InvalidYearRange)` otherwise
pub fn corpus_range(start: Year, end: Year) -> DetectResult<YearRange> {
    YearRange::new(start, end).ok_or(DetectError::InvalidYearRange { start, end })
}

/// Find the longest unbroken run of years with a non-zero count.
///
/// # Arguments
/// * `range` - The full corpus range; missing years count as zero
/// * `counts` - Mention counts of one term
///
/// # Returns
/// The run length and the year it began. Among runs of equal length the
/// earliest wins. The year is `None` when no year has mentions.
pub fn longest_run(range: YearRange, counts: &YearlyCounts) -> (u32, Option<Year>) {
    let mut max_run = 0u32;
    let mut run = 0u32;
    let mut run_start = range.start;
    let mut stable_year = None;

    for year in range.years() {
        if counts.get(&year).copied().unwrap_or(0) > 0 {
            if run == 0 {
                run_start = year;
            }
            run += 1;
            if run > max_run {
                max_run = run;
                stable_year = Some(run_start);
            }
        } else {
            run = 0;
        }
    }

    (max_run, stable_year)
}

/// Ratio of the peak yearly count to the count of the first observed year.
///
/// Returns 0 when the histogram is empty or the first observed year has no
/// mentions.
pub fn growth(counts: &YearlyCounts) -> f64 {
    let Some((_, &first)) = counts.first_key_value() else {
        return 0.0;
    };
    if first == 0 {
        return 0.0;
    }
    let peak = counts.values().copied().max().unwrap_or(0);
    peak as f64 / first as f64
}

/// Classify one term.
///
/// # Arguments
/// * `term_id` - The term being judged
/// * `counts` - Its yearly mention counts
/// * `range` - The full corpus range
/// * `params` - Thresholds
///
/// # Returns
/// * `Ok(Some(Candidate))` when the term meets all three thresholds
/// * `Ok(None)` when it misses any of them
/// * `Err(DetectError::YearOutOfRange)` when `counts` has a year outside `range`
pub fn detect_term(
    term_id: TermId,
    counts: &YearlyCounts,
    range: YearRange,
    params: &DetectionParams,
) -> DetectResult<Option<Candidate>> {
    if let Some(&year) = counts.keys().find(|y| !range.contains(**y)) {
        return Err(DetectError::YearOutOfRange {
            term_id,
            year,
            range,
        });
    }

    let (max_consecutive, stable_year) = longest_run(range, counts);
    let Some(first_stable_year) = stable_year else {
        return Ok(None);
    };
    if max_consecutive < params.min_years_present {
        return Ok(None);
    }

    let growth = growth(counts);
    if growth < params.min_growth {
        return Ok(None);
    }

    let total_mentions: u64 = counts.values().sum();
    if total_mentions < params.min_total_mentions {
        return Ok(None);
    }

    // A non-empty run guarantees at least one mentioned year.
    let mut mentioned = counts.iter().filter(|(_, &n)| n > 0).map(|(&y, _)| y);
    let Some(first_year) = mentioned.next() else {
        return Ok(None);
    };
    let last_year = mentioned.next_back().unwrap_or(first_year);

    Ok(Some(Candidate {
        term_id,
        first_year,
        last_year,
        first_stable_year,
        max_consecutive,
        growth,
        total_mentions,
        counts_per_year: counts.clone(),
    }))
}

/// Classify every term of a count table.
///
/// Candidates are returned in ascending term id order.
pub fn detect_all(
    table: &YearlyCountTable,
    range: YearRange,
    params: &DetectionParams,
) -> DetectResult<Vec<Candidate>> {
    tracing::info!(terms = table.len(), range = %range, "Selected terms for detection");

    let mut candidates = Vec::new();
    for (&term_id, counts) in table {
        if let Some(candidate) = detect_term(term_id, counts, range, params)? {
            candidates.push(candidate);
        }
    }

    tracing::info!(candidates = candidates.len(), "Detection finished");
    Ok(candidates)
}
