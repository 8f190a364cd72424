//! Error types for the extraction engine.

use std::path::PathBuf;

use neoterm_types::ErrorCode;
use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Errors raised while loading extraction resources or producing spans.
///
/// The extraction algorithms themselves are infallible; these errors come
/// from resource files and external span providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// I/O error while reading a resource file.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension not understood by any loader.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A span pattern failed to compile.
    #[error("invalid pattern for label {label}: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    /// A pattern file is not valid TOML.
    #[error("invalid pattern file: {0}")]
    PatternFile(#[from] toml::de::Error),

    /// A gazetteer line is malformed.
    #[error("invalid resource line {line}: {reason}")]
    InvalidResource { line: usize, reason: String },

    /// The span provider failed.
    #[error("span provider failed: {0}")]
    Provider(String),
}

impl ExtractError {
    /// Create an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-resource error.
    pub fn invalid_resource(line: usize, reason: impl Into<String>) -> Self {
        ExtractError::InvalidResource {
            line,
            reason: reason.into(),
        }
    }

    /// Create a span provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        ExtractError::Provider(msg.into())
    }

    /// Map to the stable error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ExtractError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::FileNotFound
            }
            ExtractError::Io { .. } => ErrorCode::InternalError,
            ExtractError::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            ExtractError::InvalidPattern { .. } => ErrorCode::InvalidPattern,
            ExtractError::PatternFile(_) | ExtractError::InvalidResource { .. } => {
                ErrorCode::InvalidResource
            }
            ExtractError::Provider(_) => ErrorCode::SpanProviderFailed,
        }
    }
}
