//! Authentication service module
//!
//! Email + password accounts:
//! - Registration with field validation and duplicate detection
//! - Login with uniform failure for unknown email and wrong password
//! - Session token issue and verification (delegated to `TokenService`)

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
pub use service::AuthService;
