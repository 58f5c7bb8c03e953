//! Seeds an empty store with a demo account and listings

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::listing::Listing;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{ListingRepository, UserRepository};
use crate::services::auth::hash_password;

use super::catalogue::DEMO_LISTINGS;

/// Account that owns every demo listing
pub const SEED_USER_EMAIL: &str = "seed@example.com";
const SEED_USER_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held listings; nothing was written
    AlreadySeeded,
    Seeded { count: usize },
}

pub struct SeedService<U, L>
where
    U: UserRepository,
    L: ListingRepository,
{
    user_repository: Arc<U>,
    listing_repository: Arc<L>,
    bcrypt_cost: u32,
}

impl<U, L> SeedService<U, L>
where
    U: UserRepository,
    L: ListingRepository,
{
    pub fn new(user_repository: Arc<U>, listing_repository: Arc<L>, bcrypt_cost: u32) -> Self {
        Self {
            user_repository,
            listing_repository,
            bcrypt_cost,
        }
    }

    /// Insert the demo catalogue unless any listing exists
    pub async fn seed(&self) -> DomainResult<SeedOutcome> {
        if self.listing_repository.count().await? > 0 {
            tracing::info!("Seed skipped: listings already present");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let owner = match self.user_repository.find_by_email(SEED_USER_EMAIL).await? {
            Some(user) => user,
            None => self.create_seed_user().await?,
        };

        // Stagger timestamps so the catalogue keeps its order when sorted newest first
        let now = Utc::now();
        for (index, demo) in DEMO_LISTINGS.iter().enumerate() {
            let mut listing = Listing::new(
                owner.id,
                demo.name.to_string(),
                demo.description.to_string(),
                demo.price,
                demo.category,
                demo.condition,
                vec![demo.image.to_string()],
                None,
            );
            listing.created_at = now - Duration::seconds(index as i64);
            self.listing_repository.create(listing).await?;
        }

        tracing::info!(count = DEMO_LISTINGS.len(), "Demo listings seeded");

        Ok(SeedOutcome::Seeded {
            count: DEMO_LISTINGS.len(),
        })
    }

    /// Create the demo account, or adopt it if a concurrent seed got there first
    async fn create_seed_user(&self) -> DomainResult<User> {
        let password_hash = hash_password(SEED_USER_PASSWORD.to_string(), self.bcrypt_cost).await?;
        let mut user = User::new(
            "Seed User".to_string(),
            SEED_USER_EMAIL.to_string(),
            "1234567890".to_string(),
            password_hash,
        );
        user.verify();

        match self.user_repository.create(user).await {
            Err(DomainError::Auth(AuthError::DuplicateAccount)) => self
                .user_repository
                .find_by_email(SEED_USER_EMAIL)
                .await?
                .ok_or_else(|| DomainError::not_found("User")),
            result => result,
        }
    }
}
