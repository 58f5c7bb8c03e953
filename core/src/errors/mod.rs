//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, FieldViolation, TokenError, UploadError, ValidationError};

use thiserror::Error;

/// Core domain errors
///
/// Every service in this crate returns `DomainResult`; the API layer maps
/// each variant to exactly one HTTP status and error code.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl DomainError {
    /// Shorthand for a persistence failure
    pub fn store(message: impl Into<String>) -> Self {
        DomainError::Store {
            message: message.into(),
        }
    }

    /// Shorthand for a missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Whether the failure is the caller's to fix (maps to a 4xx response)
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::Store { .. } | DomainError::Internal { .. } => false,
            DomainError::Upload(upload) => !matches!(upload, UploadError::Storage { .. }),
            DomainError::Token(token) => !matches!(token, TokenError::TokenGenerationFailed),
            _ => true,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
