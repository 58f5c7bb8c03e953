//! SQL rendering of `ListingFilter`

use ns_core::domain::value_objects::ListingFilter;
use sqlx::{MySql, QueryBuilder};

pub(super) const LISTING_COLUMNS: &str = "id, owner_id, name, description, price, category, \
     item_condition, images, location_address, location_lat, location_lng, is_active, created_at";

/// Escape LIKE wildcards so the term matches literally
///
/// Backslash is MySQL's default LIKE escape character.
pub(super) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `SELECT` for active listings matching `filter`, newest first
pub(super) fn find_query(filter: &ListingFilter, limit: usize) -> QueryBuilder<'static, MySql> {
    let mut query = QueryBuilder::new(format!(
        "SELECT {} FROM listings WHERE is_active = TRUE",
        LISTING_COLUMNS
    ));

    if let Some(category) = filter.category {
        query.push(" AND category = ").push_bind(category.as_str());
    }

    if let Some(condition) = filter.condition {
        query.push(" AND item_condition = ").push_bind(condition.as_str());
    }

    if let Some(min_price) = filter.min_price {
        query.push(" AND price >= ").push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        query.push(" AND price <= ").push_bind(max_price);
    }

    if let Some(term) = &filter.search {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        query
            .push(" AND (LOWER(name) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR LOWER(description) LIKE ")
            .push_bind(pattern)
            .push(")");
    }

    query
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(limit as i64);

    query
}
