//! Business services containing domain logic and use cases.

pub mod auth;
pub mod listing;
pub mod seed;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use listing::{ImageStore, ListingService, MockImageStore, UploadPolicy};
pub use seed::{SeedOutcome, SeedService, SEED_USER_EMAIL};
pub use token::{IssuedToken, TokenService, TokenServiceConfig};
