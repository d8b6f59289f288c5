/*!
 * Error types for the wordwell application.
 *
 * This module contains custom error types for the different failure domains
 * of a refresh, using the thiserror crate for ergonomic error definitions:
 * - `SourceError`: the word list could not be obtained (fatal to a refresh)
 * - `LookupError`: a single word could not be enriched (absorbed per word)
 * - `AppError`: top-level error of the command line front end
 */

use thiserror::Error;

/// Errors that can occur when fetching the candidate word pool
#[derive(Error, Debug)]
pub enum SourceError {
    /// The word list source could not be reached
    #[error("Word list source unavailable: {0}")]
    Unavailable(String),

    /// The word list source answered with a non-success status
    #[error("Word list source responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the source
        message: String,
    },

    /// The word list payload did not have the expected shape
    #[error("Failed to parse word list: {0}")]
    ParseError(String),
}

/// Errors that can occur while looking up a single word
#[derive(Error, Debug)]
pub enum LookupError {
    /// The dictionary call itself failed (network, non-2xx, bad credentials)
    #[error("Lookup failed for '{word}': {reason}")]
    Failed {
        /// Word that was looked up
        word: String,
        /// Human readable cause
        reason: String,
    },

    /// The dictionary call did not finish within the configured bound
    #[error("Lookup for '{word}' timed out after {timeout_ms} ms")]
    TimedOut {
        /// Word that was looked up
        word: String,
        /// Timeout that expired, in milliseconds
        timeout_ms: u64,
    },

    /// The payload arrived but its structure could not be decoded
    #[error("Malformed dictionary payload for '{word}': {reason}")]
    MalformedPayload {
        /// Word that was looked up
        word: String,
        /// What was wrong with the payload
        reason: String,
    },
}

impl LookupError {
    /// Word this error belongs to
    pub fn word(&self) -> &str {
        match self {
            Self::Failed { word, .. }
            | Self::TimedOut { word, .. }
            | Self::MalformedPayload { word, .. } => word,
        }
    }

    pub fn failed(word: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            word: word.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(word: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            word: word.into(),
            reason: reason.into(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The word list could not be fetched, so the refresh produced nothing
    #[error("Failed to fetch words: {0}")]
    Source(#[from] SourceError),

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

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
