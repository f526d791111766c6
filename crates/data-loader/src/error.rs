//! Error types for the data-loader crate.
//!
//! Every failure while reading the movie catalog ends up here, with enough
//! context (file, line, field) to point at the offending row.

use thiserror::Error;

/// Errors that can occur while loading and validating the catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input (bad quoting, wrong header, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row in the data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The `index` column does not match the row's position in the file
    ///
    /// Downstream everything is keyed by position, so the two must agree.
    #[error("Expected index {expected} but found {found} in line {line}")]
    IndexMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
