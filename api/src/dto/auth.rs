use ns_core::domain::value_objects::{AuthOutcome, PublicUser, RegisterUser};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/auth/register`
///
/// Missing fields deserialize as empty strings so the service can report
/// every absent field at once.
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(max = 64, message = "Phone must be at most 64 characters"))]
    pub phone: String,

    /// bcrypt only looks at the first 72 bytes
    #[validate(length(max = 72, message = "Password must be at most 72 characters"))]
    pub password: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password: request.password,
        }
    }
}

/// Body of `POST /api/auth/login`
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(max = 72, message = "Password must be at most 72 characters"))]
    pub password: String,
}

/// Successful register or login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, outcome: AuthOutcome) -> Self {
        Self {
            message: message.into(),
            token: outcome.token,
            user: outcome.user,
        }
    }
}

/// Body of `GET /api/auth/me`
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
}
