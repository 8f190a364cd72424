//! Error codes for the neoterm workspace.
//!
//! Every crate-level error maps onto one of these codes so the command-line
//! surface can print a stable identifier and a recovery hint.

use serde::{Deserialize, Serialize};

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Input Errors (0x0001 - 0x00FF)
    // =========================================================================
    /// An article record could not be parsed
    InvalidArticle = 0x0001,
    /// A file has an extension no loader understands
    UnsupportedFormat = 0x0002,
    /// A referenced file does not exist
    FileNotFound = 0x0003,
    /// An article field name is not recognized
    UnknownField = 0x0004,

    // =========================================================================
    // Extraction Errors (0x0100 - 0x01FF)
    // =========================================================================
    /// A span provider failed to produce spans
    SpanProviderFailed = 0x0100,
    /// A span pattern does not compile
    InvalidPattern = 0x0101,
    /// A gazetteer or vocabulary file is malformed
    InvalidResource = 0x0102,

    // =========================================================================
    // Detection Errors (0x0200 - 0x02FF)
    // =========================================================================
    /// The year range is inverted or empty
    InvalidYearRange = 0x0200,

    // =========================================================================
    // Workflow Errors (0x0300 - 0x03FF)
    // =========================================================================
    /// No module is registered for a (module, type) pair
    UnknownModule = 0x0300,
    /// Module parameters failed to deserialize
    InvalidParams = 0x0301,
    /// Workflow or configuration file is malformed
    InvalidConfig = 0x0302,

    // =========================================================================
    // Storage Errors (0x0400 - 0x04FF)
    // =========================================================================
    /// Database operation failed
    StorageFailed = 0x0400,
    /// A dictionary could not be queried
    DictionaryUnavailable = 0x0401,

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error
    InternalError = 0xFFFF,
}

impl ErrorCode {
    /// Returns true if this is an input error (0x0001-0x00FF)
    pub fn is_input_error(&self) -> bool {
        (0x0001..=0x00FF).contains(&self.code())
    }

    /// Returns true if this is an extraction error (0x0100-0x01FF)
    pub fn is_extraction_error(&self) -> bool {
        (0x0100..=0x01FF).contains(&self.code())
    }

    /// Returns true if this is a detection error (0x0200-0x02FF)
    pub fn is_detection_error(&self) -> bool {
        (0x0200..=0x02FF).contains(&self.code())
    }

    /// Returns true if this is a workflow error (0x0300-0x03FF)
    pub fn is_workflow_error(&self) -> bool {
        (0x0300..=0x03FF).contains(&self.code())
    }

    /// Returns true if this is a storage error (0x0400-0x04FF)
    pub fn is_storage_error(&self) -> bool {
        (0x0400..=0x04FF).contains(&self.code())
    }

    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get a user-friendly suggestion for recovering from this error.
    #[rustfmt::skip]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            // Input errors
            Self::InvalidArticle => Some("Each line must be a JSON object with at least a 'pmcid' field."),
            Self::UnsupportedFormat => Some("Convert the file to .csv or .txt with one entry per line."),
            Self::FileNotFound => Some("Check the path. Relative paths resolve from the current directory."),
            Self::UnknownField => Some("Valid article fields are 'title' and 'abstract'."),

            // Extraction errors
            Self::SpanProviderFailed => Some("Check the span provider resources and rerun 'neoterm extract'."),
            Self::InvalidPattern => Some("Fix the regular expression in the pattern file."),
            Self::InvalidResource => Some("Lines must be tab-separated. See 'neoterm extract --help'."),

            // Detection errors
            Self::InvalidYearRange => Some("Check article publication dates."),

            // Workflow errors
            Self::UnknownModule => Some("Check the 'module' and 'type' keys of the workflow stage."),
            Self::InvalidParams => Some("Check the 'params' table of the workflow module."),
            Self::InvalidConfig => Some("Fix the TOML syntax or remove the file to use defaults."),

            // Storage errors
            Self::StorageFailed => Some("Check that the database path is writable and not locked by another process."),
            Self::DictionaryUnavailable => Some("The dictionary backend is busy. Rerun 'neoterm lookup' for the remaining terms."),

            // Internal error
            Self::InternalError => Some("An internal error occurred. Please report this issue."),
        }
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        if self.is_input_error() {
            "Input"
        } else if self.is_extraction_error() {
            "Extraction"
        } else if self.is_detection_error() {
            "Detection"
        } else if self.is_workflow_error() {
            "Workflow"
        } else if self.is_storage_error() {
            "Storage"
        } else {
            "Internal"
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCode::InvalidArticle => "INVALID_ARTICLE",
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::UnknownField => "UNKNOWN_FIELD",
            ErrorCode::SpanProviderFailed => "SPAN_PROVIDER_FAILED",
            ErrorCode::InvalidPattern => "INVALID_PATTERN",
            ErrorCode::InvalidResource => "INVALID_RESOURCE",
            ErrorCode::InvalidYearRange => "INVALID_YEAR_RANGE",
            ErrorCode::UnknownModule => "UNKNOWN_MODULE",
            ErrorCode::InvalidParams => "INVALID_PARAMS",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::StorageFailed => "STORAGE_FAILED",
            ErrorCode::DictionaryUnavailable => "DICTIONARY_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(ErrorCode::InvalidArticle.category(), "Input");
        assert_eq!(ErrorCode::InvalidPattern.category(), "Extraction");
        assert_eq!(ErrorCode::InvalidYearRange.category(), "Detection");
        assert_eq!(ErrorCode::UnknownModule.category(), "Workflow");
        assert_eq!(ErrorCode::StorageFailed.category(), "Storage");
        assert_eq!(ErrorCode::InternalError.category(), "Internal");
    }

    #[test]
    fn test_every_code_has_suggestion() {
        let codes = [
            ErrorCode::InvalidArticle,
            ErrorCode::UnsupportedFormat,
            ErrorCode::FileNotFound,
            ErrorCode::UnknownField,
            ErrorCode::SpanProviderFailed,
            ErrorCode::InvalidPattern,
            ErrorCode::InvalidResource,
            ErrorCode::InvalidYearRange,
            ErrorCode::UnknownModule,
            ErrorCode::InvalidParams,
            ErrorCode::InvalidConfig,
            ErrorCode::StorageFailed,
            ErrorCode::DictionaryUnavailable,
            ErrorCode::InternalError,
        ];
        for code in codes {
            assert!(code.suggestion().is_some(), "{code} has no hint");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::UnknownModule.to_string(), "UNKNOWN_MODULE");
        assert_eq!(ErrorCode::InternalError.code(), 0xFFFF);
    }
}
