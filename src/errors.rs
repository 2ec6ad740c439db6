/*!
 * Error types for the logbatch library.
 *
 * This module contains custom error types for different parts of the batch
 * authoring pipeline, using the thiserror crate for ergonomic error
 * definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

use crate::entry::FieldTag;

/// Errors that can occur when talking to the remote directory/record API
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request exceeded the configured deadline
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl DirectoryError {
    /// Whether retrying the same call could reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_) | Self::Timeout(_) | Self::RequestFailed(_)
        )
    }
}

/// Errors that reject a whole validation or submission attempt.
///
/// Per-field resolution failures are NOT represented here: those are
/// aggregated into `BatchParsingResult::errors` so a batch can make partial
/// progress. This type covers the two cases where nothing can proceed.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Input text was structurally unparsable; nothing entered validation
    #[error("Unrecognized input format: {0}")]
    Format(String),

    /// The directory snapshot or record call failed for transport reasons;
    /// the whole attempt is invalidated and can be retried as-is
    #[error("Directory service unavailable: {0}")]
    Infrastructure(#[from] DirectoryError),

    /// No session exists for the acting user
    #[error("No active batch session for user '{0}'")]
    NoSession(String),
}

/// A single field on a single line that could not be resolved.
///
/// These are aggregated per entry, never thrown; `to_string()` yields the
/// user-facing message referencing the source line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The value matched no directory entry after normalization
    #[error("line {line}: {field} '{value}' not found")]
    NotFound {
        /// 1-based source line number
        line: usize,
        /// Field that failed to resolve
        field: FieldTag,
        /// Value as typed by the user
        value: String,
    },

    /// The value matched more than one directory entry after normalization
    #[error("line {line}: {field} '{value}' is ambiguous")]
    Ambiguous {
        /// 1-based source line number
        line: usize,
        /// Field with multiple matches
        field: FieldTag,
        /// Value as typed by the user
        value: String,
    },

    /// A date segment failed strict parsing or the range was inverted
    #[error("line {line}: date '{value}' is not a valid dd-mm-yyyy date")]
    InvalidDate {
        /// 1-based source line number
        line: usize,
        /// Raw date text as typed
        value: String,
    },
}

impl FieldError {
    /// Source line the error refers to
    pub fn line(&self) -> usize {
        match self {
            Self::NotFound { line, .. }
            | Self::Ambiguous { line, .. }
            | Self::InvalidDate { line, .. } => *line,
        }
    }

    /// Message body without the `line N:` prefix, for joining several
    /// failures of one entry into a single report line
    pub fn description(&self) -> String {
        match self {
            Self::NotFound { field, value, .. } => format!("{} '{}' not found", field, value),
            Self::Ambiguous { field, value, .. } => format!("{} '{}' is ambiguous", field, value),
            Self::InvalidDate { value, .. } => {
                format!("date '{}' is not a valid dd-mm-yyyy date", value)
            }
        }
    }
}

/// Main library error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the directory/record API
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Error rejecting a whole batch operation
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
