//! Error types for depverify
//!
//! Every verification section returns `Result<T>`; the report builder turns
//! an `Err` into the section's inline `error` field. Uses `thiserror` for
//! the `Display` and `Error` implementations.

use thiserror::Error;

/// The primary error type for depverify operations.
#[derive(Error, Debug)]
pub enum DepVerifyError {
    /// Configuration-related errors (invalid values, unreadable file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors (connect failure, timeout, undecodable body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No usable HTTP client (bad probe config, client setup failure)
    #[error("HTTP client unavailable: {0}")]
    Unavailable(String),

    /// A required field is absent from a response body
    #[error("Missing field '{0}' in repository metadata")]
    MissingField(&'static str),

    /// A field is present but has the wrong JSON type
    #[error("Invalid field '{field}': expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Input matched none of the supported date formats
    #[error("Unable to parse date: {0:?}")]
    DateParse(String),

    /// Date arithmetic left the representable range
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    /// A value did not survive serialize -> deserialize unchanged
    #[error("Round-trip mismatch: {0}")]
    RoundTrip(String),

    /// Random choice from an empty collection
    #[error("Cannot choose from an empty sequence")]
    EmptyChoice,
}

/// A specialized `Result` type for depverify operations.
pub type Result<T> = std::result::Result<T, DepVerifyError>;
