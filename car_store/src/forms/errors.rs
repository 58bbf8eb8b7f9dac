//! Form validation errors.

use thiserror::Error;

/// Errors raised while turning raw form text into a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field was left blank
    #[error("{0} is required")]
    Missing(&'static str),

    /// A numeric field did not parse
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// No form field has this name
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;
