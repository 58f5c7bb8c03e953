//! Token service module for stateless JWT session tokens
//!
//! Tokens are signed with HS256 and never persisted; validity is decided
//! by signature, issuer, audience and the `nbf`/`exp` window alone.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{IssuedToken, TokenService};
