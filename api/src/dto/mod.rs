//! Request and response bodies of the HTTP API

pub mod auth;
pub mod error;
pub mod product;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use error::{into_validation_error, ErrorResponse, ErrorResponseExt};
pub use product::{ProductCreatedResponse, ProductListResponse, SeedResponse};
