//! Error types for the form engine.

use thiserror::Error;

/// Validation outcome attached to a single field.
///
/// These are never thrown; they are collected into the form's error map and
/// reported to the caller, which decides how to display them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Required field left empty at submit time
    #[error("this field is required")]
    Required,

    /// Value present but does not match the field's mask pattern
    #[error("value does not match the expected format")]
    FormatMismatch,

    /// The postal-code autofill collaborator failed; advisory only
    #[error("address lookup failed: {0}")]
    Lookup(String),
}

/// Errors that can occur during form engine operations
#[derive(Debug, Error)]
pub enum FormError {
    /// A field name was given that does not exist in the schema
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A field's mask could not be compiled into a pattern
    #[error("invalid mask for field '{field}': {reason}")]
    InvalidMask { field: String, reason: String },

    /// The field schema failed static validation
    #[error("schema validation failed:\n{0}")]
    Schema(String),

    /// `encode` was called while validation errors were outstanding
    #[error("{0} field(s) failed validation")]
    ValidationOutstanding(usize),

    /// Payload serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Submission transport error
    #[error("transport error: {0}")]
    Transport(String),

    /// API error from the submission endpoint
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for FormError {
    fn from(err: reqwest::Error) -> Self {
        FormError::Transport(err.to_string())
    }
}

/// Errors specific to the postal-code lookup collaborator
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service reported the code as unknown
    #[error("postal code {0} not found")]
    NotFound(String),

    /// Non-success HTTP status from the lookup service
    #[error("lookup API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out
    #[error("lookup request timed out")]
    Timeout,
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else if err.is_connect() {
            LookupError::Network(format!("Connection error: {}", err))
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

/// Result type alias for form engine operations
pub type FormResult<T> = Result<T, FormError>;

/// Result type alias for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;
