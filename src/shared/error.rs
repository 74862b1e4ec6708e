//! Shared Error Types
//!
//! Errors that can be raised without the server stack: payload validation.
//! The backend wraps them in `BackendError`.
//!
//! # Usage
//!
//! ```rust
//! use social_media_api::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "This field may not be blank.");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Fail with a "may not be blank" validation error when `value` is empty
    pub fn require_non_blank(field: &str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(Self::validation(field, "This field may not be blank."));
        }
        Ok(())
    }
}
