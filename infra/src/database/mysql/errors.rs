//! Translation of SQLx failures into domain errors

use ns_core::errors::{AuthError, DomainError};
use uuid::Uuid;

/// Generic store failure with context; the driver message is logged, not returned
pub(super) fn store_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::store(context)
}

/// `users.email` unique index violations become `DuplicateAccount`
pub(super) fn user_insert_error(error: sqlx::Error) -> DomainError {
    let is_duplicate = error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if is_duplicate {
        AuthError::DuplicateAccount.into()
    } else {
        store_error("Failed to insert user", error)
    }
}

/// `listings.owner_id` foreign key violations mean the owner is gone
pub(super) fn listing_insert_error(error: sqlx::Error) -> DomainError {
    let is_missing_owner = error
        .as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation());

    if is_missing_owner {
        DomainError::not_found("User")
    } else {
        store_error("Failed to insert listing", error)
    }
}

pub(super) fn decode_error(column: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to decode column {}: {}", column, error),
    }
}

pub(super) fn parse_uuid(column: &str, raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|e| decode_error(column, e))
}
