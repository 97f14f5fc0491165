//! Error types for the rcpt-core library.
//!
//! Receipt parsing itself never fails: every extraction miss resolves to a
//! default and is reported through [`crate::receipt::ExtractionResult`]. The
//! errors here cover the surrounding plumbing (configuration files, pinned
//! reference dates).

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A reference date could not be parsed with the expected format.
    #[error("invalid date '{value}' (expected format {format})")]
    InvalidDate { value: String, format: String },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
