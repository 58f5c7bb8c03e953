//! Listing entity: an item a user offers for trade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::user::Location;

/// Maximum characters in a listing name
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum characters in a listing description
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum number of images attached to one listing
pub const MAX_IMAGES: usize = 5;

/// Fixed set of listing categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Furniture,
    Clothing,
    Books,
    Sports,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Toys,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Furniture,
        Category::Clothing,
        Category::Books,
        Category::Sports,
        Category::HomeAndGarden,
        Category::Toys,
        Category::Other,
    ];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Sports => "Sports",
            Category::HomeAndGarden => "Home & Garden",
            Category::Toys => "Toys",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| format!("Unknown category: {}", value))
    }
}

/// Fixed set of item conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Good,
        Condition::Fair,
        Condition::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Condition::ALL
            .into_iter()
            .find(|condition| condition.as_str() == value)
            .ok_or_else(|| format!("Unknown condition: {}", value))
    }
}

/// Listing entity
///
/// `owner_id` is fixed at creation; ownership never transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub condition: Condition,
    /// Public image URLs, in upload order
    pub images: Vec<String>,
    pub owner_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Soft-delete marker; inactive listings are hidden from every query
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Creates a new active listing owned by `owner_id`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_id: Uuid,
        name: String,
        description: String,
        price: f64,
        category: Category,
        condition: Condition,
        images: Vec<String>,
        location: Option<Location>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            price,
            category,
            condition,
            images,
            owner_id,
            location,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Hides the listing; there is no way back to active
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}
