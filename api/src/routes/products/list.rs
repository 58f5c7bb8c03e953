use actix_web::{web, HttpResponse};

use ns_core::domain::value_objects::{ListingFilter, ListingParams};
use ns_core::repositories::{ListingRepository, UserRepository};
use ns_core::services::listing::ImageStore;

use crate::app::AppState;
use crate::dto::ProductListResponse;
use crate::handlers::error::handle_domain_error;

/// Handler for GET /api/products
///
/// # Query Parameters
/// - `category`: exact category, `All` or empty for any
/// - `search`: case-insensitive text in name or description
/// - `minPrice`, `maxPrice`: inclusive price bounds
/// - `condition`: exact condition
///
/// Answers at most 50 active listings, newest first.
pub async fn list_products<U, L, I>(
    state: web::Data<AppState<U, L, I>>,
    params: web::Query<ListingParams>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    I: ImageStore + 'static,
{
    let filter = match ListingFilter::from_params(&params) {
        Ok(filter) => filter,
        Err(error) => return handle_domain_error(error.into()),
    };

    match state.listing_service.list(&filter).await {
        Ok(products) => HttpResponse::Ok().json(ProductListResponse::new(products)),
        Err(error) => handle_domain_error(error),
    }
}
