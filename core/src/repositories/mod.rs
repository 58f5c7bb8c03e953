//! Repository interfaces and in-memory implementations.

pub mod listing;
pub mod user;

pub use listing::{ListingRepository, MockListingRepository};
pub use user::{MockUserRepository, UserRepository};
