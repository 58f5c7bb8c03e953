//! HTTP route handlers, grouped by resource

pub mod auth;
pub mod products;
pub mod seed;
