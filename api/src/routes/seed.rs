//! Demo data route, only mounted when seeding is enabled

use actix_web::{web, HttpResponse};

use ns_core::errors::DomainError;
use ns_core::repositories::{ListingRepository, UserRepository};
use ns_core::services::listing::ImageStore;
use ns_core::services::seed::SeedOutcome;

use crate::app::AppState;
use crate::dto::SeedResponse;
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/seed
///
/// Inserts the demo catalogue once; later calls change nothing and report a
/// count of 0.
pub async fn seed<U, L, I>(state: web::Data<AppState<U, L, I>>) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    I: ImageStore + 'static,
{
    let Some(seed_service) = state.seed_service.as_ref() else {
        return handle_domain_error(DomainError::not_found("Route"));
    };

    match seed_service.seed().await {
        Ok(SeedOutcome::AlreadySeeded) => HttpResponse::Ok().json(SeedResponse {
            message: "Database already seeded".to_string(),
            count: 0,
        }),
        Ok(SeedOutcome::Seeded { count }) => HttpResponse::Ok().json(SeedResponse {
            message: format!("{} fake products seeded successfully", count),
            count,
        }),
        Err(error) => handle_domain_error(error),
    }
}
