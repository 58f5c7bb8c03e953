use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use ns_core::repositories::{ListingRepository, UserRepository};
use ns_core::services::listing::ImageStore;

use crate::app::AppState;
use crate::dto::ProductCreatedResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::form::read_product_form;

/// Handler for POST /api/products (requires authentication)
///
/// # Request Body (multipart/form-data)
/// - `name`, `description`, `price`, `category`, `condition`: text parts
/// - `location`: optional JSON `{"address": ..., "lat": ..., "lng": ...}`
/// - `images`: up to 5 jpeg/png/gif files, 5 MB each
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "message": "Product created successfully",
///     "product": { "id": "...", "images": ["/uploads/1718000000000-3fa2b1c4.jpg"], "owner": {...}, ... }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `upload_rejected` or `validation_error`
/// - 401 / 403: missing or invalid token
/// - 404 Not Found: the token's user no longer exists
/// - 500 Internal Server Error: image store or database failure
pub async fn create_product<U, L, I>(
    state: web::Data<AppState<U, L, I>>,
    auth: AuthContext,
    payload: Multipart,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    I: ImageStore + 'static,
{
    let form = match read_product_form(payload, &state.upload_policy).await {
        Ok(form) => form,
        Err(error) => return handle_domain_error(error),
    };

    match state
        .listing_service
        .create(auth.user_id, form.listing, form.images)
        .await
    {
        Ok(product) => {
            tracing::info!(
                listing_id = %product.listing.id,
                owner_id = %auth.user_id,
                "Listing created"
            );
            HttpResponse::Created().json(ProductCreatedResponse::new(product))
        }
        Err(error) => handle_domain_error(error),
    }
}
