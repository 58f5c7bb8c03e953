use actix_web::{web, HttpResponse};
use uuid::Uuid;

use ns_core::errors::ValidationError;
use ns_core::repositories::{ListingRepository, UserRepository};
use ns_core::services::listing::ImageStore;

use crate::app::AppState;
use crate::dto::ProductListResponse;
use crate::handlers::error::handle_domain_error;

/// Handler for GET /api/users/{id}/products (also GET /api/products/user/{id})
///
/// An owner with no listings, or no account, gets an empty list. An id that
/// is not a UUID is a validation error.
pub async fn products_by_owner<U, L, I>(
    state: web::Data<AppState<U, L, I>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    I: ImageStore + 'static,
{
    let owner_id = match Uuid::parse_str(path.trim()) {
        Ok(id) => id,
        Err(_) => {
            return handle_domain_error(ValidationError::field("id", "Invalid user id").into())
        }
    };

    match state.listing_service.list_by_owner(owner_id).await {
        Ok(products) => HttpResponse::Ok().json(ProductListResponse::new(products)),
        Err(error) => handle_domain_error(error),
    }
}
