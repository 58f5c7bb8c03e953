//! Main listing service implementation

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::{
    ImageUpload, ListingFilter, ListingView, NewListing, OwnerProfile, MAX_RESULTS,
};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{ListingRepository, UserRepository};

use super::image_store::ImageStore;
use super::upload::UploadPolicy;

/// Listing service: creation, browsing and owner-scoped management
pub struct ListingService<U, L, I>
where
    U: UserRepository,
    L: ListingRepository,
    I: ImageStore,
{
    user_repository: Arc<U>,
    listing_repository: Arc<L>,
    image_store: Arc<I>,
    upload_policy: UploadPolicy,
}

impl<U, L, I> ListingService<U, L, I>
where
    U: UserRepository,
    L: ListingRepository,
    I: ImageStore,
{
    pub fn new(
        user_repository: Arc<U>,
        listing_repository: Arc<L>,
        image_store: Arc<I>,
        upload_policy: UploadPolicy,
    ) -> Self {
        Self {
            user_repository,
            listing_repository,
            image_store,
            upload_policy,
        }
    }

    /// Create a listing owned by `owner_id`
    ///
    /// Checks run in this order, and nothing is written until all pass:
    /// 1. Upload policy (count, type, size)
    /// 2. Field rules
    /// 3. Owner exists
    ///
    /// Images are then stored and the listing persisted. If persisting fails
    /// the stored images are removed again.
    pub async fn create(
        &self,
        owner_id: Uuid,
        input: NewListing,
        images: Vec<ImageUpload>,
    ) -> DomainResult<ListingView> {
        self.upload_policy.validate(&images)?;

        let fields = input.validate()?;

        let owner = self
            .user_repository
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let urls = self.store_images(&images).await?;

        let listing = Listing::new(
            owner.id,
            fields.name,
            fields.description,
            fields.price,
            fields.category,
            fields.condition,
            urls.clone(),
            fields.location,
        );

        let listing = match self.listing_repository.create(listing).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!(owner_id = %owner_id, error = %e, "Failed to persist listing");
                self.discard_images(&urls).await;
                return Err(e);
            }
        };

        tracing::info!(
            listing_id = %listing.id,
            owner_id = %owner_id,
            images = listing.images.len(),
            "Listing created"
        );

        Ok(ListingView::new(listing, Some(OwnerProfile::from(&owner))))
    }

    /// Active listings matching the filter, newest first, at most `MAX_RESULTS`
    pub async fn list(&self, filter: &ListingFilter) -> DomainResult<Vec<ListingView>> {
        let listings = self.listing_repository.find(filter, MAX_RESULTS).await?;
        self.with_owners(listings).await
    }

    /// All active listings of one owner, newest first
    ///
    /// An unknown owner simply has no listings.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> DomainResult<Vec<ListingView>> {
        let listings = self.listing_repository.find_by_owner(owner_id).await?;
        self.with_owners(listings).await
    }

    /// Hide a listing; only its owner may do so
    ///
    /// Deactivating an already inactive listing succeeds without a write.
    pub async fn deactivate(&self, caller_id: Uuid, listing_id: Uuid) -> DomainResult<()> {
        let mut listing = self
            .listing_repository
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))?;

        if !listing.is_owned_by(caller_id) {
            tracing::warn!(
                listing_id = %listing_id,
                caller_id = %caller_id,
                "Deactivation refused: caller does not own listing"
            );
            return Err(AuthError::Forbidden.into());
        }

        if !listing.is_active {
            return Ok(());
        }

        listing.deactivate();
        self.listing_repository.update(listing).await?;

        tracing::info!(listing_id = %listing_id, "Listing deactivated");
        Ok(())
    }

    async fn store_images(&self, images: &[ImageUpload]) -> DomainResult<Vec<String>> {
        let mut urls = Vec::with_capacity(images.len());

        for image in images {
            match self.image_store.store(image).await {
                Ok(url) => urls.push(url),
                Err(e) => {
                    tracing::error!(filename = %image.filename, error = %e, "Failed to store image");
                    self.discard_images(&urls).await;
                    return Err(e.into());
                }
            }
        }

        Ok(urls)
    }

    /// Best-effort cleanup; failures are logged, not returned
    async fn discard_images(&self, urls: &[String]) {
        for url in urls {
            if let Err(e) = self.image_store.remove(url).await {
                tracing::warn!(url = %url, error = %e, "Failed to remove orphaned image");
            }
        }
    }

    async fn with_owners(&self, listings: Vec<Listing>) -> DomainResult<Vec<ListingView>> {
        let mut owner_ids: Vec<Uuid> = listings.iter().map(|l| l.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners: HashMap<Uuid, OwnerProfile> = if owner_ids.is_empty() {
            HashMap::new()
        } else {
            self.user_repository
                .find_by_ids(&owner_ids)
                .await?
                .iter()
                .map(|user| (user.id, OwnerProfile::from(user)))
                .collect()
        };

        Ok(listings
            .into_iter()
            .map(|listing| {
                let owner = owners.get(&listing.owner_id).cloned();
                ListingView::new(listing, owner)
            })
            .collect())
    }
}
