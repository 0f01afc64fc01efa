//! Core error type

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Redsm5Result<T> = Result<T, Redsm5Error>;

/// Main error type for the pipeline
///
/// Variants carry a human-readable message plus optional context describing
/// where the error happened.
#[derive(Error, Debug, Clone)]
pub enum Redsm5Error {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Chat or embedding endpoint returned an unusable answer
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        model: Option<String>,
        context: Option<String>,
    },

    /// HTTP transport errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        context: Option<String>,
    },

    /// Model output did not match the expected structure
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        context: Option<String>,
    },

    /// Model output was cut off before completion
    #[error("Truncated output: {message}")]
    Truncated { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// CSV parsing errors
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        line: Option<u64>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}
