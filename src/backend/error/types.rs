/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 *
 * # Error Categories
 *
 * ## Request Errors
 *
 * - Missing or invalid credentials (401)
 * - Acting on somebody else's account (403)
 * - Unknown resources (404)
 * - Invalid payloads (400, via `SharedError`)
 *
 * ## Gateway Errors
 *
 * - Handshakes without an authenticated identity are refused (403)
 * - Lifecycle misuse of a connection (500, never reachable from a client)
 *
 * ## Infrastructure Errors
 *
 * - Database not configured (503)
 * - Database, hashing and token failures (500)
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use social_media_api::backend::error::BackendError;
///
/// let err = BackendError::not_found("post");
/// let err = BackendError::forbidden("You can only modify your own account.");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request carries no valid credentials
    #[error("Authentication credentials were not provided.")]
    Unauthorized,

    /// The caller is authenticated but may not perform this action
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// The requested resource does not exist (or is not visible to the caller)
    #[error("{resource} not found")]
    NotFound {
        /// Resource name, e.g. "post"
        resource: String,
    },

    /// A notification handshake arrived without an authenticated identity
    #[error("Notification handshake rejected: unauthenticated")]
    HandshakeRejected,

    /// Connection or application state misuse
    #[error("State error: {message}")]
    StateError {
        /// Human-readable error message
        message: String,
    },

    /// `DATABASE_URL` was not configured at start-up
    #[error("Database not configured")]
    DatabaseUnavailable,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    /// Token signing error
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Shared error (payload validation)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a new not-found error for `resource`
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Create a validation error for `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::validation(field, message))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Unauthorized` - 401
    /// - `Forbidden`, `HandshakeRejected` - 403
    /// - `NotFound` - 404
    /// - `DatabaseUnavailable` - 503
    /// - `SharedError::ValidationError` - 400
    /// - Everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::HandshakeRejected => StatusCode::FORBIDDEN,
            Self::StateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error message
    ///
    /// Internal failures are reported generically; their details only go to the log.
    pub fn message(&self) -> String {
        match self {
            Self::Forbidden { message } => message.clone(),
            Self::StateError { .. }
            | Self::Database(_)
            | Self::Password(_)
            | Self::Token(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
