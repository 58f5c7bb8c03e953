use ns_core::domain::value_objects::ListingView;
use serde::Serialize;

/// Body of the listing browse endpoints
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<ListingView>,
}

impl ProductListResponse {
    pub fn new(products: Vec<ListingView>) -> Self {
        Self {
            success: true,
            products,
        }
    }
}

/// Body of a successful `POST /api/products`
#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub success: bool,
    pub message: String,
    pub product: ListingView,
}

impl ProductCreatedResponse {
    pub fn new(product: ListingView) -> Self {
        Self {
            success: true,
            message: "Product created successfully".to_string(),
            product,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: usize,
}
