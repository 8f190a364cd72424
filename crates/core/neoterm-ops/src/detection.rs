//! Emerging-term detection over the stored corpus.

use serde::{Deserialize, Serialize};

use neoterm_detect::{detect_all, DetectionParams};
use neoterm_store::{CandidateStore, CandidateWrite, CorpusState};
use neoterm_types::YearRange;

use crate::error::OpsResult;

/// What a detection run reads and how it writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionRequest {
    /// Thresholds.
    #[serde(flatten)]
    pub params: DetectionParams,
    /// Dictionaries whose known terms are not eligible.
    pub exclude_dictionaries: Vec<String>,
    /// Existing candidate rows are kept unless this is `Replace`.
    pub write: CandidateWrite,
}

impl DetectionRequest {
    /// Create a request with the given thresholds.
    pub fn new(params: DetectionParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Exclude terms known to these dictionaries.
    pub fn excluding(mut self, dictionaries: Vec<String>) -> Self {
        self.exclude_dictionaries = dictionaries;
        self
    }

    /// Set the write mode.
    pub fn with_write(mut self, write: CandidateWrite) -> Self {
        self.write = write;
        self
    }
}

/// Outcome of one detection run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Corpus year range, if any article is dated.
    pub year_range: Option<YearRange>,
    /// Terms eligible for detection.
    pub terms_considered: u64,
    /// Terms that met every threshold.
    pub candidates_found: u64,
    /// Rows inserted or updated.
    pub candidates_written: u64,
}

/// Run detection over the stored yearly counts and persist the results.
///
/// A corpus without dated articles produces an empty report and a warning.
pub fn run_detection(
    state: &mut CorpusState,
    request: &DetectionRequest,
) -> OpsResult<DetectionReport> {
    let Some(range) = state.year_range()? else {
        tracing::warn!("No dated articles; nothing to detect");
        return Ok(DetectionReport::default());
    };

    let table = state.yearly_counts(&request.exclude_dictionaries)?;
    tracing::info!(
        range = %range,
        terms = table.len(),
        excluded = ?request.exclude_dictionaries,
        "Loaded yearly counts"
    );

    let candidates = detect_all(&table, range, &request.params)?;
    let written = state.candidates.write(&candidates, request.write)?;

    let report = DetectionReport {
        year_range: Some(range),
        terms_considered: table.len() as u64,
        candidates_found: candidates.len() as u64,
        candidates_written: written as u64,
    };
    tracing::info!(
        found = report.candidates_found,
        written = report.candidates_written,
        mode = ?request.write,
        "Detection stored"
    );
    Ok(report)
}
