//! Mapping of domain errors onto HTTP responses
//!
//! Every failure leaves the API in the same envelope
//! (`{error, message, details?, timestamp}`). Server-side faults keep their
//! detail in the logs and answer with a generic message.

use actix_web::{
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use ns_core::errors::{AuthError, DomainError, TokenError, UploadError, ValidationError};
use ns_shared::errors::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Status, error code and client-facing message for a domain error
fn classify(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            error.to_string(),
        ),
        DomainError::Auth(auth) => match auth {
            AuthError::DuplicateAccount => (
                StatusCode::BAD_REQUEST,
                error_codes::DUPLICATE_ACCOUNT,
                auth.to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_CREDENTIALS,
                auth.to_string(),
            ),
            AuthError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                error_codes::UNAUTHENTICATED,
                auth.to_string(),
            ),
            AuthError::Forbidden => (
                StatusCode::FORBIDDEN,
                error_codes::FORBIDDEN,
                auth.to_string(),
            ),
        },
        DomainError::Token(TokenError::TokenGenerationFailed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
        // The reason a token was refused is not shared with the client
        DomainError::Token(_) => (
            StatusCode::FORBIDDEN,
            error_codes::INVALID_TOKEN,
            "Invalid token".to_string(),
        ),
        DomainError::Upload(UploadError::Storage { .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
        DomainError::Upload(upload) => (
            StatusCode::BAD_REQUEST,
            error_codes::UPLOAD_REJECTED,
            upload.to_string(),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
        DomainError::Store { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::STORE_ERROR,
            "A storage error occurred".to_string(),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code, message) = classify(&error);

    if error.is_client_error() {
        tracing::warn!(status = status.as_u16(), code, error = %error, "Request rejected");
    } else {
        tracing::error!(status = status.as_u16(), code, error = %error, "Request failed");
    }

    let mut response = ErrorResponse::new(code, message);
    match &error {
        DomainError::Validation(validation) => {
            response = response.add_detail("fields", &validation.violations);
        }
        DomainError::Upload(UploadError::TooManyFiles { max, actual }) => {
            response = response
                .add_detail("maxFiles", max)
                .add_detail("received", actual);
        }
        DomainError::Upload(UploadError::FileTooLarge { filename, limit }) => {
            response = response
                .add_detail("filename", filename)
                .add_detail("maxFileBytes", limit);
        }
        _ => {}
    }

    response.to_response(status)
}

/// Wrap a domain error as an `actix_web::Error` that renders our envelope
///
/// Used where actix expects an error value rather than a response
/// (extractors, payload config handlers).
pub fn rejection(error: DomainError) -> actix_web::Error {
    let reason = error.to_string();
    InternalError::from_response(reason, handle_domain_error(error)).into()
}

/// Body errors from `web::Json` extraction
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body is too large".to_string()
        }
        JsonPayloadError::ContentType => "Expected an application/json body".to_string(),
        _ => format!("Malformed JSON body: {}", err),
    };
    rejection(ValidationError::field("body", message).into())
}

/// Query string errors from `web::Query` extraction
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejection(ValidationError::field("query", format!("Malformed query string: {}", err)).into())
}
