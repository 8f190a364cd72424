//! Command-line interface for neoterm.
//!
//! This crate provides the `neoterm` binary. It includes commands for:
//!
//! - **Corpus**: Import articles, show counts and the year range
//! - **Pipeline**: Extract terms, look them up in vocabularies, detect
//!   emerging terms and list the candidates
//! - **Workflows**: Run a TOML workflow of staged modules
//! - **Maintenance**: Clear tables
//!
//! # Quick Start
//!
//! ```bash
//! # Import articles
//! neoterm import articles.jsonl
//!
//! # Extract terms with the hybrid extractor
//! neoterm extract
//!
//! # Detect emerging terms and show them
//! neoterm detect
//! neoterm candidates --sort growth
//! ```
//!
//! # Output Formats
//!
//! All commands support `--format` for output control:
//!
//! - `human` (default): Human-readable with colors
//! - `json`: Machine-readable JSON
//!
//! # Configuration
//!
//! Configuration is loaded from `config.toml` in the data directory.
//! Override with `--config` or `NEOTERM_CONFIG`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod progress;
pub mod prompt;

// Re-export main types
pub use cli::{Cli, Commands, DetectArgs, ExtractArgs, OutputFormatArg};
pub use config::CliConfig;
pub use context::CorpusContext;
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Render};
