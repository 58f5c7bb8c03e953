//! MySQL implementation of the UserRepository trait.
//!
//! Email uniqueness is enforced by the `uq_users_email` index; inserts that
//! collide surface as `AuthError::DuplicateAccount`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use ns_core::domain::entities::user::{Location, RatingSummary, User};
use ns_core::errors::DomainError;
use ns_core::repositories::UserRepository;

use super::errors::{decode_error, parse_uuid, store_error, user_insert_error};

const USER_COLUMNS: &str = "id, name, email, phone, password_hash, location_address, \
     location_lat, location_lng, is_verified, ratings_average, ratings_count, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| decode_error("id", e))?;

        let address: Option<String> = row
            .try_get("location_address")
            .map_err(|e| decode_error("location_address", e))?;
        let lat: Option<f64> = row
            .try_get("location_lat")
            .map_err(|e| decode_error("location_lat", e))?;
        let lng: Option<f64> = row
            .try_get("location_lng")
            .map_err(|e| decode_error("location_lng", e))?;
        let location = Location { address, lat, lng };

        Ok(User {
            id: parse_uuid("id", &id)?,
            name: row.try_get("name").map_err(|e| decode_error("name", e))?,
            email: row.try_get("email").map_err(|e| decode_error("email", e))?,
            phone: row.try_get("phone").map_err(|e| decode_error("phone", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| decode_error("password_hash", e))?,
            location: (!location.is_empty()).then_some(location),
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| decode_error("is_verified", e))?,
            ratings: RatingSummary {
                average: row
                    .try_get("ratings_average")
                    .map_err(|e| decode_error("ratings_average", e))?,
                count: row
                    .try_get("ratings_count")
                    .map_err(|e| decode_error("ratings_count", e))?,
            },
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| decode_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| decode_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find user by email", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::new(format!("SELECT {} FROM users WHERE id IN (", USER_COLUMNS));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find users by id", e))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let location = user.location.clone().unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, phone, password_hash, location_address, location_lat,
                location_lng, is_verified, ratings_average, ratings_count, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(location.address)
        .bind(location.lat)
        .bind(location.lng)
        .bind(user.is_verified)
        .bind(user.ratings.average)
        .bind(user.ratings.count)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(user_insert_error)?;

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to check email", e))?;

        let found: i64 = row.try_get("found").map_err(|e| decode_error("found", e))?;
        Ok(found == 1)
    }
}
