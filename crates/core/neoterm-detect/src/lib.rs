//! Emerging-term detection.
//!
//! Given mention counts per term and per year, decide which terms are
//! "emerging": present for a sustained run of years, growing in frequency
//! and mentioned often enough to matter.
//!
//! # Algorithm
//!
//! For each term, over every year of the corpus range:
//!
//! 1. **Stability**: the longest unbroken run of years with mentions must be
//!    at least `min_years_present`. The run's first year is recorded as
//!    `first_stable_year`; equal runs resolve to the earliest.
//! 2. **Growth**: the peak yearly count divided by the count of the first
//!    observed year must be at least `min_growth`. A first year with zero
//!    mentions gives a growth of 0.
//! 3. **Volume**: the total number of mentions must be at least
//!    `min_total_mentions`.
//!
//! # Example
//!
//! ```
//! use neoterm_detect::{corpus_range, detect_term, DetectionParams};
//! use neoterm_types::YearlyCounts;
//!
//! let counts: YearlyCounts = [(2010, 1), (2011, 1), (2012, 1), (2014, 2)].into_iter().collect();
//! let range = corpus_range(2010, 2014).unwrap();
//!
//! let candidate = detect_term(1, &counts, range, &DetectionParams::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(candidate.max_consecutive, 3);
//! assert_eq!(candidate.growth, 2.0);
//! ```

pub mod detection;
pub mod error;
pub mod params;

pub use detection::{corpus_range, detect_all, detect_term, growth, longest_run};
pub use error::{DetectError, DetectResult};
pub use params::DetectionParams;
