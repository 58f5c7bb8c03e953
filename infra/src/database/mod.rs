//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Repository implementations for users and listings

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlListingRepository, MySqlUserRepository};
