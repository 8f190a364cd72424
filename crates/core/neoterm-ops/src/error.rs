//! Error types for the operations layer.
//!
//! This module defines the `OpsError` enum used by every operation in
//! this crate.

use std::path::PathBuf;

use neoterm_types::ErrorCode;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = std::result::Result<T, OpsError>;

/// Errors that can occur during corpus operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpsError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// I/O error while reading an input file.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A vocabulary or article line could not be parsed.
    #[error("invalid input at line {line}: {reason}")]
    InvalidInput { line: usize, reason: String },

    // =========================================================================
    // Dictionary Errors
    // =========================================================================
    /// A dictionary backend could not answer a search.
    #[error("dictionary {dictionary} unavailable: {reason}")]
    DictionaryUnavailable { dictionary: String, reason: String },

    // =========================================================================
    // Workflow Errors
    // =========================================================================
    /// No module is registered for the `(module, type)` pair.
    #[error("unknown module ({module}, {kind})")]
    UnknownModule { module: String, kind: String },

    /// Module parameters are missing or malformed.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Workflow file is not valid TOML.
    #[error("invalid workflow: {0}")]
    Workflow(#[from] toml::de::Error),

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// Storage error.
    #[error("store error: {0}")]
    Store(#[from] neoterm_store::StoreError),

    /// Extraction error.
    #[error("extraction error: {0}")]
    Extract(#[from] neoterm_extract::ExtractError),

    /// Detection error.
    #[error("detection error: {0}")]
    Detect(#[from] neoterm_detect::DetectError),
}

impl OpsError {
    /// Create an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OpsError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(line: usize, reason: impl Into<String>) -> Self {
        OpsError::InvalidInput {
            line,
            reason: reason.into(),
        }
    }

    /// Create an invalid parameters error.
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        OpsError::InvalidParams(msg.into())
    }

    /// Create a dictionary unavailable error.
    pub fn dictionary_unavailable(dictionary: impl Into<String>, reason: impl Into<String>) -> Self {
        OpsError::DictionaryUnavailable {
            dictionary: dictionary.into(),
            reason: reason.into(),
        }
    }

    /// Map to the stable error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            OpsError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::FileNotFound
            }
            OpsError::Io { .. } => ErrorCode::InternalError,
            OpsError::InvalidInput { .. } => ErrorCode::InvalidResource,
            OpsError::DictionaryUnavailable { .. } => ErrorCode::DictionaryUnavailable,
            OpsError::UnknownModule { .. } => ErrorCode::UnknownModule,
            OpsError::InvalidParams(_) => ErrorCode::InvalidParams,
            OpsError::Workflow(_) => ErrorCode::InvalidConfig,
            OpsError::Store(e) => e.error_code(),
            OpsError::Extract(e) => e.error_code(),
            OpsError::Detect(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OpsError::UnknownModule {
            module: "ner".to_string(),
            kind: "scispacy".to_string(),
        };
        assert_eq!(err.to_string(), "unknown module (ner, scispacy)");
        assert_eq!(err.error_code(), ErrorCode::UnknownModule);

        let err = OpsError::invalid_params("missing 'path'");
        assert!(err.to_string().contains("missing 'path'"));
    }

    #[test]
    fn test_missing_file_maps_to_file_not_found() {
        let err = OpsError::io(
            "articles.jsonl",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.error_code(), ErrorCode::FileNotFound);
    }

    #[test]
    fn test_wrapped_errors_keep_their_codes() {
        let err: OpsError = neoterm_detect::DetectError::InvalidYearRange {
            start: 2020,
            end: 2010,
        }
        .into();
        assert_eq!(err.error_code(), ErrorCode::InvalidYearRange);
    }
}
