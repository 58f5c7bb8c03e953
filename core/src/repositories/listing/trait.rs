//! Listing repository trait defining the interface for listing persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::ListingFilter;
use crate::errors::DomainError;

/// Repository trait for Listing entity persistence operations
///
/// Every query method returns active listings only, newest first.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a new listing
    ///
    /// Returns `DomainError::NotFound` when the owner does not exist and the
    /// store enforces that relation.
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError>;

    /// Find a listing by id regardless of its active flag
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError>;

    /// Active listings matching `filter`, newest first, at most `limit`
    async fn find(&self, filter: &ListingFilter, limit: usize) -> Result<Vec<Listing>, DomainError>;

    /// All active listings of one owner, newest first
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError>;

    /// Replace a stored listing
    async fn update(&self, listing: Listing) -> Result<Listing, DomainError>;

    /// Total number of listings, active or not
    async fn count(&self) -> Result<u64, DomainError>;
}
