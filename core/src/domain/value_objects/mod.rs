//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod listing_input;
pub mod listing_query;
pub mod listing_view;
pub mod profile;

// Re-export commonly used types
pub use auth_response::{AuthOutcome, RegisterUser};
pub use listing_input::{ImageUpload, ListingFields, NewListing};
pub use listing_query::{ListingFilter, ListingParams, MAX_RESULTS};
pub use listing_view::ListingView;
pub use profile::{OwnerProfile, PublicUser};
