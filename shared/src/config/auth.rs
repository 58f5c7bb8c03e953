//! Session and password hashing settings

use serde::{Deserialize, Serialize};

use super::env_or;

const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// How session tokens are signed and how long they last
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HS256 signing key
    pub secret: String,

    /// Session lifetime in seconds
    pub token_expiry: i64,

    pub issuer: String,

    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_JWT_SECRET.to_string(),
            token_expiry: 24 * 3600,
            issuer: "neighborswap".to_string(),
            audience: "neighborswap-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// `JWT_SECRET`, `JWT_EXPIRY_SECONDS`, `JWT_ISSUER` and `JWT_AUDIENCE`
    pub fn from_env() -> Self {
        let base = Self::default();
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            secret: non_empty("JWT_SECRET").unwrap_or(base.secret),
            token_expiry: env_or("JWT_EXPIRY_SECONDS", base.token_expiry),
            issuer: non_empty("JWT_ISSUER").unwrap_or(base.issuer),
            audience: non_empty("JWT_AUDIENCE").unwrap_or(base.audience),
        }
    }

    /// True while the built-in development key is in use
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Authentication settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    /// bcrypt work factor for stored password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            bcrypt_cost: env_or("BCRYPT_COST", default_bcrypt_cost()),
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    12
}
