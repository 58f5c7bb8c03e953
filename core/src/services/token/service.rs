//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// A freshly signed session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
    /// Seconds until expiry
    pub expires_in: i64,
}

/// Service for signing and verifying session tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Signs a new session token for a user
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<IssuedToken, TokenError> {
        let mut claims = Claims::new_session(user_id, email, self.config.expiry_seconds);
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();

        let token = self.encode_jwt(&claims)?;

        Ok(IssuedToken {
            token,
            claims,
            expires_in: self.config.expiry_seconds,
        })
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.config.algorithm), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Verifies a session token and returns its claims
    ///
    /// Checks signature, issuer, audience, `nbf` and `exp`; the subject must
    /// be a valid user id.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::ImmatureSignature
                | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                _ => TokenError::InvalidTokenFormat,
            },
        )?;

        let claims = token_data.claims;
        if claims.user_id().is_err() {
            return Err(TokenError::InvalidClaims);
        }

        Ok(claims)
    }
}
