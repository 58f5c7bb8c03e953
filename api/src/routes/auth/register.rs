use actix_web::{web, HttpResponse};
use validator::Validate;

use ns_core::repositories::{ListingRepository, UserRepository};
use ns_core::services::listing::ImageStore;

use crate::app::AppState;
use crate::dto::{into_validation_error, AuthResponse, RegisterRequest};
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ana",
///     "email": "ana@example.com",
///     "phone": "5551234567",
///     "password": "secret123"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "message": "User created successfully",
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "user": { "id": "...", "name": "Ana", "email": "ana@example.com", ... }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `validation_error` listing every bad field, or
///   `duplicate_account` when the email is taken
/// - 500 Internal Server Error: store failure
pub async fn register<U, L, I>(
    state: web::Data<AppState<U, L, I>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    I: ImageStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(into_validation_error(errors).into());
    }

    match state.auth_service.register(request.into_inner().into()).await {
        Ok(outcome) => {
            HttpResponse::Created().json(AuthResponse::new("User created successfully", outcome))
        }
        Err(error) => handle_domain_error(error),
    }
}
