//! Demo data for empty stores

mod catalogue;
mod service;

pub use service::{SeedOutcome, SeedService, SEED_USER_EMAIL};
