//! Main authentication service implementation

use std::sync::Arc;

use ns_shared::utils::validation::{is_valid_email, mask_email, normalize_email, validators};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthOutcome, PublicUser, RegisterUser};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};

/// Password hashed once per service to burn comparable time on unknown emails
const TIMING_DUMMY_PASSWORD: &str = "neighborswap-timing-dummy";

/// Authentication service for registration, login and session identity
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// User repository for credential persistence
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    config: AuthServiceConfig,
    dummy_hash: OnceCell<String>,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a new account and open a session for it
    ///
    /// # Returns
    ///
    /// * `Ok(AuthOutcome)` - Public profile of the new user plus a session token
    /// * `Err(DomainError::Validation)` - One or more fields violate the rules
    /// * `Err(DomainError::Auth(AuthError::DuplicateAccount))` - Email already registered
    pub async fn register(&self, input: RegisterUser) -> DomainResult<AuthOutcome> {
        validate_registration(&input)?;

        let email = normalize_email(&input.email);

        if self.user_repository.exists_by_email(&email).await? {
            tracing::info!(email = %mask_email(&email), "Registration rejected: email already registered");
            return Err(AuthError::DuplicateAccount.into());
        }

        let password_hash = hash_password(input.password, self.config.bcrypt_cost).await?;

        let user = User::new(
            input.name.trim().to_string(),
            email,
            input.phone.trim().to_string(),
            password_hash,
        );

        // The store re-checks uniqueness, so a concurrent registration that
        // slipped past `exists_by_email` still fails with DuplicateAccount
        let user = self.user_repository.create(user).await?;

        tracing::info!(user_id = %user.id, email = %mask_email(&user.email), "User registered");

        self.open_session(&user)
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthOutcome> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let dummy = self.dummy_hash().await?;
                let _ = verify_password(password.to_string(), dummy).await?;
                tracing::info!(email = %mask_email(&email), "Login failed");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::info!(email = %mask_email(&email), "Login failed");
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.open_session(&user)
    }

    /// Public profile of an authenticated user
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<PublicUser> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        Ok(PublicUser::from(&user))
    }

    /// Verify a session token and return its identity
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_service.verify(token)
    }

    fn open_session(&self, user: &User) -> DomainResult<AuthOutcome> {
        let issued = self.token_service.issue(user.id, &user.email)?;

        Ok(AuthOutcome {
            user: PublicUser::from(user),
            token: issued.token,
            expires_in: issued.expires_in,
        })
    }

    async fn dummy_hash(&self) -> DomainResult<String> {
        let cost = self.config.bcrypt_cost;
        self.dummy_hash
            .get_or_try_init(|| hash_password(TIMING_DUMMY_PASSWORD.to_string(), cost))
            .await
            .cloned()
    }
}

/// Field rules for registration; every violation is reported
fn validate_registration(input: &RegisterUser) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();

    if !validators::not_empty(&input.name) {
        errors.push("name", "Name is required");
    }

    if !validators::not_empty(&input.email) {
        errors.push("email", "Email is required");
    } else if !is_valid_email(&input.email) {
        errors.push("email", "Email must be a valid address");
    }

    if !validators::not_empty(&input.phone) {
        errors.push("phone", "Phone is required");
    }

    if !validators::not_empty(&input.password) {
        errors.push("password", "Password is required");
    } else if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        );
    }

    errors.into_result()
}
