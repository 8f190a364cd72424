//! Detection error types.
//!
//! The algorithm itself cannot fail on well-formed input. These errors
//! report a count table that does not agree with the corpus year range.

use neoterm_types::{ErrorCode, TermId, Year, YearRange};
use thiserror::Error;

/// Errors that can occur during emerging-term detection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DetectError {
    // =========================================================================
    // Year Range Errors
    // =========================================================================
    /// The last year precedes the first year.
    #[error("invalid year range {start}-{end}")]
    InvalidYearRange {
        /// First year
        start: Year,
        /// Last year
        end: Year,
    },

    /// A term has counts for a year outside the corpus range.
    #[error("term {term_id} has counts for {year}, outside corpus range {range}")]
    YearOutOfRange {
        /// The offending term
        term_id: TermId,
        /// The year with counts
        year: Year,
        /// The corpus range
        range: YearRange,
    },
}

impl DetectError {
    /// Map to the stable error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            DetectError::InvalidYearRange { .. } | DetectError::YearOutOfRange { .. } => {
                ErrorCode::InvalidYearRange
            }
        }
    }
}

/// Result type for detection operations.
pub type DetectResult<T> = std::result::Result<T, DetectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DetectError::InvalidYearRange {
            start: 2015,
            end: 2010,
        };
        assert_eq!(err.to_string(), "invalid year range 2015-2010");

        let err = DetectError::YearOutOfRange {
            term_id: 4,
            year: 2020,
            range: YearRange::new(2010, 2014).unwrap(),
        };
        assert!(err.to_string().contains("2010-2014"));
        assert_eq!(err.error_code(), ErrorCode::InvalidYearRange);
    }
}
