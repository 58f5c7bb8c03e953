//! Raw listing input and its validated form.

use ns_shared::utils::validation::validators;

use crate::domain::entities::listing::{
    Category, Condition, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
use crate::domain::entities::user::Location;
use crate::errors::ValidationError;

/// Listing fields exactly as submitted in the multipart form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewListing {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub condition: String,
    /// JSON-encoded `Location`, as sent by the web client
    pub location: Option<String>,
}

/// Listing fields after every rule has passed
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub condition: Condition,
    pub location: Option<Location>,
}

impl NewListing {
    /// Checks every field and reports all violations at once
    pub fn validate(&self) -> Result<ListingFields, ValidationError> {
        let mut errors = ValidationError::default();

        let name = self.name.trim();
        if !validators::not_empty(name) {
            errors.push("name", "Name is required");
        } else if !validators::length_between(name, 1, MAX_NAME_LENGTH) {
            errors.push(
                "name",
                format!("Name must be at most {} characters", MAX_NAME_LENGTH),
            );
        }

        let description = self.description.trim();
        if !validators::not_empty(description) {
            errors.push("description", "Description is required");
        } else if !validators::length_between(description, 1, MAX_DESCRIPTION_LENGTH) {
            errors.push(
                "description",
                format!("Description must be at most {} characters", MAX_DESCRIPTION_LENGTH),
            );
        }

        let price = match self.price.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => Some(price),
            Ok(_) => {
                errors.push("price", "Price must be greater than 0");
                None
            }
            Err(_) => {
                errors.push("price", "Price must be a number");
                None
            }
        };

        let category = self
            .category
            .parse::<Category>()
            .map_err(|message| errors.push("category", message))
            .ok();

        let condition = self
            .condition
            .parse::<Condition>()
            .map_err(|message| errors.push("condition", message))
            .ok();

        let location = match self.location.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match serde_json::from_str::<Location>(raw) {
                Ok(location) if location.is_empty() => None,
                Ok(location) => Some(location),
                Err(_) => {
                    errors.push("location", "Location must be a JSON object");
                    None
                }
            },
        };

        match (price, category, condition) {
            (Some(price), Some(category), Some(condition)) if errors.is_empty() => {
                Ok(ListingFields {
                    name: name.to_string(),
                    description: description.to_string(),
                    price,
                    category,
                    condition,
                    location,
                })
            }
            _ => Err(errors),
        }
    }
}

/// One uploaded image, fully buffered
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Client-supplied file name
    pub filename: String,
    /// Declared MIME type
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lower-cased extension of the client file name, if any
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}
