//! Listing route handlers
//!
//! Listings are called "products" on the wire for compatibility with the
//! existing client.

pub mod by_owner;
pub mod create;
mod form;
pub mod list;
