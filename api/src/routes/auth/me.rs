use actix_web::{web, HttpResponse};

use ns_core::repositories::{ListingRepository, UserRepository};
use ns_core::services::listing::ImageStore;

use crate::app::AppState;
use crate::dto::UserResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/auth/me (requires authentication)
///
/// A valid token whose user has since disappeared answers 404.
pub async fn me<U, L, I>(state: web::Data<AppState<U, L, I>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    I: ImageStore + 'static,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse { user }),
        Err(error) => handle_domain_error(error),
    }
}
