//! Shared fixtures for the API integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use serde_json::{json, Value};

use ns_api::AppState;
use ns_core::repositories::{MockListingRepository, MockUserRepository};
use ns_core::services::listing::MockImageStore;
use ns_shared::config::AppConfig;

pub type TestState = AppState<MockUserRepository, MockListingRepository, MockImageStore>;

/// Application state over in-memory stores, plus handles to inspect them
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: MockUserRepository,
    pub listings: MockListingRepository,
    pub images: MockImageStore,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let users = MockUserRepository::new();
        let listings = MockListingRepository::new();
        let images = MockImageStore::new();

        let state = web::Data::new(AppState::new(
            Arc::new(users.clone()),
            Arc::new(listings.clone()),
            Arc::new(images.clone()),
            config,
        ));

        Self {
            state,
            users,
            listings,
            images,
        }
    }
}

/// Development defaults with the cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.bcrypt_cost = 4;
    config.seed.enabled = true;
    config.upload.directory = std::env::temp_dir().join("neighborswap-api-tests");
    config
}

pub fn register_request(name: &str, email: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": name,
            "email": email,
            "phone": "5551234567",
            "password": "secret123",
        }))
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
}

/// Token and user id from a successful register or login response
pub async fn session_of<B: MessageBody>(resp: ServiceResponse<B>) -> (String, String) {
    assert!(resp.status().is_success(), "unexpected status {}", resp.status());
    let body: Value = test::read_body_json(resp).await;
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Hand-rolled `multipart/form-data` body
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: "neighborswap-test-boundary".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, filename, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Content-Type header value and the finished body
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }

    /// A valid listing with every required text field
    pub fn bike() -> Self {
        Self::new()
            .text("name", "Mountain Bike")
            .text("description", "Lightly used trail bike, new tires")
            .text("price", "250")
            .text("category", "Sports")
            .text("condition", "Good")
    }
}

/// `POST /api/products` carrying `form`
pub fn create_product_request(token: &str, form: MultipartForm) -> test::TestRequest {
    let (content_type, body) = form.finish();
    test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(token))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
}

/// Smallest byte string that looks like a JPEG to a human reader
pub fn jpeg_bytes() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0xFF, 0xD9]
}
