//! In-memory implementation of ListingRepository for tests and local demos

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::ListingFilter;
use crate::errors::DomainError;

use super::trait_::ListingRepository;

/// Mock listing repository backed by a `HashMap`
///
/// Does not check that owners exist; the listing service does that.
#[derive(Clone, Default)]
pub struct MockListingRepository {
    listings: Arc<RwLock<HashMap<Uuid, Listing>>>,
    fail_writes: Arc<RwLock<bool>>,
}

impl MockListingRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `create` and `update` calls fail with a store error
    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    async fn check_writable(&self) -> Result<(), DomainError> {
        if *self.fail_writes.read().await {
            return Err(DomainError::store("listing store unavailable"));
        }
        Ok(())
    }
}

fn newest_first(listings: &mut [Listing]) {
    listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl ListingRepository for MockListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError> {
        self.check_writable().await?;
        let mut listings = self.listings.write().await;
        listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError> {
        Ok(self.listings.read().await.get(&id).cloned())
    }

    async fn find(&self, filter: &ListingFilter, limit: usize) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        let mut found: Vec<Listing> = listings
            .values()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect();
        newest_first(&mut found);
        found.truncate(limit);
        Ok(found)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        let mut found: Vec<Listing> = listings
            .values()
            .filter(|listing| listing.is_active && listing.owner_id == owner_id)
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(found)
    }

    async fn update(&self, listing: Listing) -> Result<Listing, DomainError> {
        self.check_writable().await?;
        let mut listings = self.listings.write().await;

        if !listings.contains_key(&listing.id) {
            return Err(DomainError::not_found("Listing"));
        }

        listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.listings.read().await.len() as u64)
    }
}
