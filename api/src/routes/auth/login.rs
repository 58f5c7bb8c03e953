use actix_web::{web, HttpResponse};
use validator::Validate;

use ns_core::repositories::{ListingRepository, UserRepository};
use ns_core::services::listing::ImageStore;

use crate::app::AppState;
use crate::dto::{into_validation_error, AuthResponse, LoginRequest};
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/auth/login
///
/// Unknown email and wrong password both answer 400 `invalid_credentials`
/// with the same message.
pub async fn login<U, L, I>(
    state: web::Data<AppState<U, L, I>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    I: ImageStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(into_validation_error(errors).into());
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(AuthResponse::new("Login successful", outcome)),
        Err(error) => handle_domain_error(error),
    }
}
