//! Domain entities representing core business objects.

pub mod listing;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use listing::{Category, Condition, Listing, MAX_DESCRIPTION_LENGTH, MAX_IMAGES, MAX_NAME_LENGTH};
pub use token::{Claims, JWT_AUDIENCE, JWT_ISSUER, SESSION_TOKEN_EXPIRY_HOURS};
pub use user::{Location, RatingSummary, User};
