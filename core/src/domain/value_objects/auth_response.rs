//! Inputs and results of the authentication flow.

use serde::{Deserialize, Serialize};

use super::profile::PublicUser;

/// Registration input as received from the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Result of a successful register or login
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    pub user: PublicUser,

    /// Signed session token
    pub token: String,

    /// Seconds until the token expires
    pub expires_in: i64,
}
