//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `ns_core`:
//! - **Database**: MySQL `UserRepository` and `ListingRepository` using SQLx
//! - **Storage**: local-disk `ImageStore` serving files under `/uploads`
//!
//! The expected MySQL schema lives in `schema.sql` at the crate root.

// Re-export core types for convenience
pub use ns_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Storage module - listing image persistence
pub mod storage;

pub use database::{DatabasePool, MySqlListingRepository, MySqlUserRepository, PoolStatistics};
pub use storage::LocalImageStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
