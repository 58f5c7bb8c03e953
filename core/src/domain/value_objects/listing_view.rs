//! Listing joined with its owner's public profile.

use serde::Serialize;

use crate::domain::entities::listing::Listing;

use super::profile::OwnerProfile;

/// What clients receive for each product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,

    /// `None` only if the owner record has vanished from the store
    pub owner: Option<OwnerProfile>,
}

impl ListingView {
    pub fn new(listing: Listing, owner: Option<OwnerProfile>) -> Self {
        Self { listing, owner }
    }
}
