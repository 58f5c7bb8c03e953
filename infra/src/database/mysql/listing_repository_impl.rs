//! MySQL implementation of the ListingRepository trait.
//!
//! Images are stored as a JSON array of URLs in a TEXT column; `condition` is
//! a reserved word in MySQL, so the column is `item_condition`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use ns_core::domain::entities::listing::{Category, Condition, Listing};
use ns_core::domain::entities::user::Location;
use ns_core::domain::value_objects::ListingFilter;
use ns_core::errors::DomainError;
use ns_core::repositories::ListingRepository;

use super::errors::{decode_error, listing_insert_error, parse_uuid, store_error};
use super::listing_filter::{find_query, LISTING_COLUMNS};

/// MySQL implementation of ListingRepository
pub struct MySqlListingRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlListingRepository {
    /// Create a new MySQL listing repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Listing entity
    fn row_to_listing(row: &MySqlRow) -> Result<Listing, DomainError> {
        let id: String = row.try_get("id").map_err(|e| decode_error("id", e))?;
        let owner_id: String = row.try_get("owner_id").map_err(|e| decode_error("owner_id", e))?;

        let category: String = row.try_get("category").map_err(|e| decode_error("category", e))?;
        let condition: String = row
            .try_get("item_condition")
            .map_err(|e| decode_error("item_condition", e))?;

        let images: String = row.try_get("images").map_err(|e| decode_error("images", e))?;
        let images: Vec<String> =
            serde_json::from_str(&images).map_err(|e| decode_error("images", e))?;

        let location = Location {
            address: row
                .try_get("location_address")
                .map_err(|e| decode_error("location_address", e))?,
            lat: row
                .try_get("location_lat")
                .map_err(|e| decode_error("location_lat", e))?,
            lng: row
                .try_get("location_lng")
                .map_err(|e| decode_error("location_lng", e))?,
        };

        Ok(Listing {
            id: parse_uuid("id", &id)?,
            name: row.try_get("name").map_err(|e| decode_error("name", e))?,
            description: row
                .try_get("description")
                .map_err(|e| decode_error("description", e))?,
            price: row.try_get("price").map_err(|e| decode_error("price", e))?,
            category: category
                .parse::<Category>()
                .map_err(|e| decode_error("category", e))?,
            condition: condition
                .parse::<Condition>()
                .map_err(|e| decode_error("item_condition", e))?,
            images,
            owner_id: parse_uuid("owner_id", &owner_id)?,
            location: (!location.is_empty()).then_some(location),
            is_active: row.try_get("is_active").map_err(|e| decode_error("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| decode_error("created_at", e))?,
        })
    }

    fn encode_images(listing: &Listing) -> Result<String, DomainError> {
        serde_json::to_string(&listing.images).map_err(|e| DomainError::Internal {
            message: format!("Failed to encode images: {}", e),
        })
    }
}

#[async_trait]
impl ListingRepository for MySqlListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError> {
        let images = Self::encode_images(&listing)?;
        let location = listing.location.clone().unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO listings (
                id, owner_id, name, description, price, category, item_condition, images,
                location_address, location_lat, location_lng, is_active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(listing.id.to_string())
        .bind(listing.owner_id.to_string())
        .bind(&listing.name)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(listing.category.as_str())
        .bind(listing.condition.as_str())
        .bind(images)
        .bind(location.address)
        .bind(location.lat)
        .bind(location.lng)
        .bind(listing.is_active)
        .bind(listing.created_at)
        .execute(&self.pool)
        .await
        .map_err(listing_insert_error)?;

        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError> {
        let query = format!("SELECT {} FROM listings WHERE id = ? LIMIT 1", LISTING_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find listing", e))?;

        row.as_ref().map(Self::row_to_listing).transpose()
    }

    async fn find(&self, filter: &ListingFilter, limit: usize) -> Result<Vec<Listing>, DomainError> {
        let mut query = find_query(filter, limit);

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to query listings", e))?;

        rows.iter().map(Self::row_to_listing).collect()
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let query = format!(
            "SELECT {} FROM listings WHERE owner_id = ? AND is_active = TRUE ORDER BY created_at DESC",
            LISTING_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(owner_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to query owner listings", e))?;

        rows.iter().map(Self::row_to_listing).collect()
    }

    async fn update(&self, listing: Listing) -> Result<Listing, DomainError> {
        let images = Self::encode_images(&listing)?;
        let location = listing.location.clone().unwrap_or_default();

        let result = sqlx::query(
            r#"
            UPDATE listings SET
                name = ?, description = ?, price = ?, category = ?, item_condition = ?,
                images = ?, location_address = ?, location_lat = ?, location_lng = ?,
                is_active = ?
            WHERE id = ?
            "#,
        )
        .bind(&listing.name)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(listing.category.as_str())
        .bind(listing.condition.as_str())
        .bind(images)
        .bind(location.address)
        .bind(location.lat)
        .bind(location.lng)
        .bind(listing.is_active)
        .bind(listing.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to update listing", e))?;

        if result.rows_affected() == 0 && self.find_by_id(listing.id).await?.is_none() {
            return Err(DomainError::not_found("Listing"));
        }

        Ok(listing)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM listings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to count listings", e))?;

        let total: i64 = row.try_get("total").map_err(|e| decode_error("total", e))?;
        Ok(total as u64)
    }
}
