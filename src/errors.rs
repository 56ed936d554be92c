/*!
 * Error types for the wortfluss application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to external collaborators
/// (translation provider, definition source, spreadsheet store)
#[derive(Error, Debug)]
pub enum ProviderError {
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
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while preparing the glossary work queue
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// A row carries a word in both language columns; which direction to
    /// enrich in is undecidable, so glossary preparation must abort
    #[error("row {row_index} has both language columns set: {source_word:?}, {target_word:?}")]
    AmbiguousRow {
        /// 1-based sheet row index
        row_index: usize,
        /// Word found in the source-language column
        source_word: String,
        /// Word found in the target-language column
        target_word: String,
    },

    /// The glossary source could not be read
    #[error("failed to fetch glossary rows: {0}")]
    FetchFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from an external collaborator
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from glossary preparation
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

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
