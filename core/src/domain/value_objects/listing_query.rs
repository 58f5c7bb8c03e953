//! Browse filters for the listing catalogue.

use serde::Deserialize;

use crate::domain::entities::listing::{Category, Condition, Listing};
use crate::errors::ValidationError;

/// Maximum number of listings returned by a browse query
pub const MAX_RESULTS: usize = 50;

/// Category value meaning "no category filter"
const ALL_CATEGORIES: &str = "All";

/// Raw browse parameters as they arrive on the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub condition: Option<String>,
}

/// Typed browse filter; every unset field matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub category: Option<Category>,
    /// Literal, case-insensitive substring of name or description
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub condition: Option<Condition>,
}

/// Trimmed value, or `None` when absent or blank
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(
    value: &Option<String>,
    field: &str,
    errors: &mut ValidationError,
) -> Option<f64> {
    let raw = present(value)?;
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => Some(price),
        _ => {
            errors.push(field, format!("{} must be a number", field));
            None
        }
    }
}

impl ListingFilter {
    /// Builds a filter from raw parameters, ignoring blank values
    ///
    /// Unknown categories or conditions and non-numeric prices are rejected
    /// rather than silently widening the result set.
    pub fn from_params(params: &ListingParams) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        let category = match present(&params.category) {
            None | Some(ALL_CATEGORIES) => None,
            Some(raw) => raw
                .parse::<Category>()
                .map_err(|message| errors.push("category", message))
                .ok(),
        };

        let condition = present(&params.condition).and_then(|raw| {
            raw.parse::<Condition>()
                .map_err(|message| errors.push("condition", message))
                .ok()
        });

        let min_price = parse_price(&params.min_price, "minPrice", &mut errors);
        let max_price = parse_price(&params.max_price, "maxPrice", &mut errors);

        errors.into_result()?;

        Ok(Self {
            category,
            search: present(&params.search).map(str::to_string),
            min_price,
            max_price,
            condition,
        })
    }

    /// Whether a listing belongs in the result set
    pub fn matches(&self, listing: &Listing) -> bool {
        if !listing.is_active {
            return false;
        }
        if self.category.is_some_and(|c| c != listing.category) {
            return false;
        }
        if self.condition.is_some_and(|c| c != listing.condition) {
            return false;
        }
        if self.min_price.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price > max) {
            return false;
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                listing.name.to_lowercase().contains(&term)
                    || listing.description.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}
