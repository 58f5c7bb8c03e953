//! Authentication route handlers
//!
//! - `POST /api/auth/register` creates an account and opens a session
//! - `POST /api/auth/login` exchanges email and password for a session token
//! - `GET /api/auth/me` returns the caller's public profile

pub mod login;
pub mod me;
pub mod register;
