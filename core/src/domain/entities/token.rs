//! Session token claims

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SESSION_TOKEN_EXPIRY_HOURS: i64 = 24;

pub const JWT_ISSUER: &str = "neighborswap";

pub const JWT_AUDIENCE: &str = "neighborswap-api";

/// JWT payload carried by every session token
///
/// `sub` is the user id and `email` the address the session was opened
/// with. `jti` is random per issue, so two logins never share a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl Claims {
    /// Claims for a session starting now and lasting `expiry_seconds`
    pub fn new_session(user_id: Uuid, email: &str, expiry_seconds: i64) -> Self {
        let issued_at = Utc::now();

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(expiry_seconds)).timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Inside the `nbf`..`exp` window
    pub fn is_valid(&self) -> bool {
        (self.nbf..self.exp).contains(&Utc::now().timestamp())
    }

    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        self.sub.parse()
    }
}
