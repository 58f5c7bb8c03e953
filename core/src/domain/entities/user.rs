//! User entity representing a registered NeighborSwap member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form address plus optional coordinates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Location {
    /// True when no part of the location is set
    pub fn is_empty(&self) -> bool {
        self.address.as_deref().map_or(true, |a| a.trim().is_empty())
            && self.lat.is_none()
            && self.lng.is_none()
    }
}

/// Running average of the ratings a user has received
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

/// User entity
///
/// Intentionally not `Serialize`: the password hash must never leave the
/// service layer. Use the projections in `value_objects` for output.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login key, stored trimmed and lower-cased
    pub email: String,

    pub phone: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    pub location: Option<Location>,

    /// Whether the account has been verified
    pub is_verified: bool,

    pub ratings: RatingSummary,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified User with no ratings
    pub fn new(name: String, email: String, phone: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            location: None,
            is_verified: false,
            ratings: RatingSummary::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the user as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "5551234".to_string(),
            "$2b$04$hash".to_string(),
        );

        assert_eq!(user.name, "Alice");
        assert!(!user.is_verified);
        assert_eq!(user.ratings, RatingSummary::default());
        assert!(user.location.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_user_verification() {
        let mut user = User::new(
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "5550000".to_string(),
            "hash".to_string(),
        );

        user.verify();
        assert!(user.is_verified);
    }

    #[test]
    fn test_location_is_empty() {
        assert!(Location::default().is_empty());
        assert!(Location {
            address: Some("  ".to_string()),
            ..Default::default()
        }
        .is_empty());
        assert!(!Location {
            lat: Some(52.5),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_location_serialization_skips_missing_parts() {
        let location = Location {
            address: Some("12 Elm Street".to_string()),
            lat: None,
            lng: None,
        };
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json, serde_json::json!({ "address": "12 Elm Street" }));
    }
}
