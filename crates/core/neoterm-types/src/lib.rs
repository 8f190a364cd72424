//! Data structures for the neoterm workspace.
//!
//! This crate provides the types that flow between the extraction engine,
//! the detection algorithm, the SQLite store and the command-line surface.
//! It contains no business logic, only type definitions with serialization
//! support.
//!
//! # Module Organization
//!
//! - [`article`] - Article records and the text fields extractors read
//! - [`term`] - Term candidates produced by extractors
//! - [`candidate`] - Emerging-term candidates and yearly count tables
//! - [`constants`] - Thresholds shared by several crates
//! - [`error`] - Error codes with recovery hints
//!
//! # Example
//!
//! ```
//! use neoterm_types::{ArticleField, TermCandidate};
//!
//! let candidate = TermCandidate {
//!     text: "cancer treatment".to_string(),
//!     surface_form: "Cancer treatment".to_string(),
//!     word_count: 2,
//!     start_pos: 0,
//!     end_pos: 16,
//!     pos_model: "NN+NN".to_string(),
//!     article_field: ArticleField::Abstract,
//!     label: None,
//! };
//!
//! assert_eq!(candidate.pos_parts().count(), candidate.word_count);
//! ```

/// Crate version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod article;
pub mod candidate;
pub mod constants;
pub mod error;
pub mod term;

pub use article::{Article, ArticleField, NewArticle, ParseFieldError};
pub use candidate::{Candidate, YearRange, YearlyCountTable, YearlyCounts};
pub use constants::*;
pub use error::ErrorCode;
pub use term::{TermCandidate, TermRecord};

/// Row identifier of an article.
pub type ArticleId = i64;

/// Row identifier of a term.
pub type TermId = i64;

/// Row identifier of a registered extraction module.
pub type ModuleId = i64;

/// Row identifier of a registered dictionary.
pub type DictionaryId = i64;

/// Calendar year.
pub type Year = i32;
