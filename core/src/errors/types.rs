//! Domain-specific error types for authentication, listings and uploads

use serde::Serialize;
use thiserror::Error;

/// Authentication and authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Registration with an email that is already taken
    #[error("User already exists")]
    DuplicateAccount,

    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer credential was presented
    #[error("Access token required")]
    Unauthenticated,

    /// Authenticated caller may not act on the resource
    #[error("Not allowed to modify this resource")]
    Forbidden,
}

/// Session token errors; all surface to clients as an invalid token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// A single violated input rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Malformed or missing input, listing every violated field
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("Validation failed: {}", summary(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Validation error for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    /// Record another violation
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected error
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Names of the violated fields, in recording order
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rejected image uploads
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Too many images: {actual} provided, at most {max} allowed")]
    TooManyFiles { max: usize, actual: usize },

    #[error("Only image files are allowed (jpeg, jpg, png, gif): {filename}")]
    UnsupportedType { filename: String },

    #[error("Image {filename} exceeds the {limit} byte limit")]
    FileTooLarge { filename: String, limit: usize },

    /// The image store failed; not the caller's fault
    #[error("Failed to store image: {message}")]
    Storage { message: String },
}
