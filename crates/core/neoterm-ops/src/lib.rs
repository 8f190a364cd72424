//! Corpus operations for neoterm.
//!
//! This crate ties the extraction engine, the detection algorithm and the
//! SQLite store together:
//!
//! - [`import_file`] loads JSON Lines articles into the corpus.
//! - [`ExtractionRun`] runs one extractor over every stored article.
//! - [`lookup_terms`] marks terms a controlled vocabulary already knows.
//! - [`run_detection`] classifies emerging terms and stores candidates.
//! - [`clean_tables`] deletes tables in dependency order.
//! - [`run_workflow`] chains all of the above from a TOML file.
//!
//! # Example
//!
//! ```
//! use neoterm_extract::{PosBasedHybridExtractor, StopWordSet};
//! use neoterm_ops::{import_jsonl, run_detection, DetectionRequest, ExtractionConfig, ExtractionRun};
//! use neoterm_store::CorpusState;
//!
//! let mut state = CorpusState::open_in_memory().unwrap();
//! let lines = r#"{"pmcid":"PMC1","abstract":"Liquid biopsy screening.","pubdate":"2015"}"#;
//! import_jsonl(&mut state, lines.as_bytes()).unwrap();
//!
//! let extractor = PosBasedHybridExtractor::new(StopWordSet::english());
//! let report = ExtractionRun::new(Box::new(extractor), ExtractionConfig::default())
//!     .run(&mut state)
//!     .unwrap();
//! assert_eq!(report.articles_processed, 1);
//!
//! let detection = run_detection(&mut state, &DetectionRequest::default()).unwrap();
//! assert_eq!(detection.candidates_found, 0);
//! ```

pub mod cache;
pub mod clean;
pub mod detection;
pub mod error;
pub mod extraction;
pub mod import;
pub mod lookup;
pub mod workflow;

pub use cache::LfuCache;
pub use clean::{clean_tables, CleanReport};
pub use detection::{run_detection, DetectionReport, DetectionRequest};
pub use error::{OpsError, OpsResult};
pub use extraction::{ExtractionConfig, ExtractionReport, ExtractionRun};
pub use import::{import_file, import_jsonl, parse_pubdate, ImportReport};
pub use lookup::{lookup_terms, DictionaryEntry, DictionaryLookup, LookupReport, VocabularyFile};
pub use workflow::{
    build_module, run_workflow, ModuleContext, ModuleOutcome, ModuleReport, PipelineModule,
    Workflow,
};
