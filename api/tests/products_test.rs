//! Listing creation and browsing endpoints

mod common;

use std::time::Duration;

use actix_web::{http::StatusCode, test};
use serde_json::Value;
use uuid::Uuid;

use common::{
    create_product_request, jpeg_bytes, login_request, register_request, session_of,
    test_config, MultipartForm, TestContext,
};
use ns_api::create_app;
use ns_core::domain::value_objects::NewListing;
use ns_core::repositories::ListingRepository;

fn new_listing(name: &str, price: &str, category: &str, condition: &str) -> NewListing {
    NewListing {
        name: name.to_string(),
        description: format!("{} in working order", name),
        price: price.to_string(),
        category: category.to_string(),
        condition: condition.to_string(),
        location: None,
    }
}

fn product_names(body: &Value) -> Vec<String> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_bike_listing_end_to_end() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let (token, user_id) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;

    let form = MultipartForm::bike()
        .text("location", r#"{"address":"12 Elm St","lat":40.7,"lng":-74.0}"#)
        .file("images", "bike.jpg", "image/jpeg", &jpeg_bytes());
    let resp = test::call_service(&app, create_product_request(&token, form).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Product created successfully");

    let product = &body["product"];
    assert_eq!(product["name"], "Mountain Bike");
    assert_eq!(product["price"], 250.0);
    assert_eq!(product["category"], "Sports");
    assert_eq!(product["condition"], "Good");
    assert_eq!(product["isActive"], true);
    assert_eq!(product["location"]["address"], "12 Elm St");
    assert_eq!(product["owner"]["id"], user_id.as_str());
    assert_eq!(product["owner"]["name"], "Ana");
    assert_eq!(product["owner"]["email"], "ana@example.com");

    let images = product["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert!(images[0].as_str().unwrap().starts_with("/uploads/"));
    assert!(images[0].as_str().unwrap().ends_with(".jpg"));
    assert_eq!(ctx.images.urls().await.len(), 1);

    // Visible to anonymous browsers
    let req = test::TestRequest::get()
        .uri("/api/products?search=BIKE&category=Sports")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = test::read_body(resp).await;
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.to_lowercase().contains("password"));
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(product_names(&body), vec!["Mountain Bike"]);

    // And on the owner's page, under both paths
    for uri in [
        format!("/api/users/{}/products", user_id),
        format!("/api/products/user/{}", user_id),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(product_names(&body), vec!["Mountain Bike"]);
    }
}

/// Every key anywhere in a JSON tree
fn all_keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map
            .iter()
            .flat_map(|(key, child)| std::iter::once(key.clone()).chain(all_keys(child)))
            .collect(),
        Value::Array(items) => items.iter().flat_map(all_keys).collect(),
        _ => Vec::new(),
    }
}

#[actix_web::test]
async fn test_register_login_create_and_browse() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let (token, user_id) = session_of(
        test::call_service(&app, login_request("ana@example.com", "secret123").to_request()).await,
    )
    .await;

    let form = MultipartForm::new()
        .text("name", "Bike")
        .text("description", "Commuter bike with a basket")
        .text("price", "100")
        .text("category", "Sports")
        .text("condition", "Good");
    let resp = test::call_service(&app, create_product_request(&token, form).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/products?category=Sports")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    let bike = &products[0];
    assert_eq!(bike["name"], "Bike");
    assert_eq!(bike["price"], 100.0);
    assert_eq!(bike["category"], "Sports");
    assert_eq!(bike["condition"], "Good");
    assert_eq!(bike["owner"]["id"], user_id.as_str());
    assert_eq!(bike["owner"]["name"], "Ana");
    assert!(all_keys(&body)
        .iter()
        .all(|key| !key.to_lowercase().contains("password")));
}

#[actix_web::test]
async fn test_price_range_is_inclusive_and_newest_first() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, user_id) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;
    let owner = Uuid::parse_str(&user_id).unwrap();

    let service = &ctx.state.listing_service;
    let mut hidden = None;
    for listing in [
        new_listing("Charger", "100", "Electronics", "New"),
        new_listing("Cable", "99.99", "Electronics", "New"),
        new_listing("Monitor", "300", "Electronics", "Good"),
        new_listing("Racket", "200", "Sports", "Good"),
        new_listing("Old Radio", "250", "Electronics", "Poor"),
        new_listing("Tablet", "500", "Electronics", "Like New"),
        new_listing("Camera", "500.01", "Electronics", "Good"),
    ] {
        let name = listing.name.clone();
        let view = service.create(owner, listing, Vec::new()).await.unwrap();
        if name == "Old Radio" {
            hidden = Some(view.listing.id);
        }
        // Distinct creation times keep the expected order unambiguous
        actix_rt::time::sleep(Duration::from_millis(5)).await;
    }
    service.deactivate(owner, hidden.unwrap()).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/products?category=Electronics&minPrice=100&maxPrice=500")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(product_names(&body), vec!["Tablet", "Monitor", "Charger"]);
    let products = body["products"].as_array().unwrap();
    assert!(products.iter().all(|p| p["category"] == "Electronics" && p["isActive"] == true));
}

#[actix_web::test]
async fn test_too_many_images_are_rejected_before_storing() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (token, _) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;

    let mut form = MultipartForm::bike();
    for i in 0..6 {
        form = form.file("images", &format!("photo{}.jpg", i), "image/jpeg", &jpeg_bytes());
    }
    let resp = test::call_service(&app, create_product_request(&token, form).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "upload_rejected");
    assert_eq!(body["details"]["maxFiles"], 5);
    assert_eq!(body["details"]["received"], 6);

    assert_eq!(ctx.images.write_count(), 0);
    assert_eq!(ctx.listings.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_non_image_uploads_are_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (token, _) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;

    for (filename, content_type) in [
        ("notes.pdf", "application/pdf"),
        ("sneaky.jpg", "application/pdf"),
        ("sneaky.pdf", "image/jpeg"),
    ] {
        let form = MultipartForm::bike().file("images", filename, content_type, b"%PDF-1.4");
        let resp = test::call_service(&app, create_product_request(&token, form).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", filename);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "upload_rejected");
    }

    assert_eq!(ctx.images.write_count(), 0);
    assert_eq!(ctx.listings.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_oversized_image_is_rejected() {
    let mut config = test_config();
    config.upload.max_file_bytes = 1024;
    let ctx = TestContext::with_config(config);
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (token, _) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;

    let form = MultipartForm::bike().file("images", "huge.png", "image/png", &vec![0u8; 2048]);
    let resp = test::call_service(&app, create_product_request(&token, form).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "upload_rejected");
    assert_eq!(body["details"]["filename"], "huge.png");
    assert_eq!(body["details"]["maxFileBytes"], 1024);
    assert_eq!(ctx.images.write_count(), 0);
}

#[actix_web::test]
async fn test_invalid_fields_are_all_reported() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (token, _) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;

    let form = MultipartForm::new()
        .text("name", "")
        .text("description", "Something")
        .text("price", "-3")
        .text("category", "Cars")
        .text("condition", "Good")
        .file("images", "a.png", "image/png", &[1, 2, 3]);
    let resp = test::call_service(&app, create_product_request(&token, form).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "price", "category"]);

    assert_eq!(ctx.images.write_count(), 0);
    assert_eq!(ctx.listings.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_store_failure_discards_uploaded_images() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (token, _) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;

    ctx.listings.set_fail_writes(true).await;

    let form = MultipartForm::bike()
        .file("images", "a.jpg", "image/jpeg", &jpeg_bytes())
        .file("images", "b.gif", "image/gif", b"GIF89a");
    let resp = test::call_service(&app, create_product_request(&token, form).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "store_error");

    assert_eq!(ctx.images.write_count(), 2);
    assert!(ctx.images.urls().await.is_empty());
}

#[actix_web::test]
async fn test_browse_filters() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, user_id) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;
    let owner = Uuid::parse_str(&user_id).unwrap();

    let service = &ctx.state.listing_service;
    for listing in [
        new_listing("Desk Lamp", "15", "Home & Garden", "Like New"),
        new_listing("Laptop", "650", "Electronics", "Good"),
        new_listing("Headphones", "80", "Electronics", "Like New"),
        new_listing("Road Bike", "300", "Sports", "Fair"),
    ] {
        service.create(owner, listing, Vec::new()).await.unwrap();
    }

    let cases = [
        ("/api/products", 4),
        ("/api/products?category=All", 4),
        ("/api/products?category=", 4),
        ("/api/products?category=Electronics", 2),
        ("/api/products?category=Home%20%26%20Garden", 1),
        ("/api/products?condition=Like%20New", 2),
        ("/api/products?minPrice=80&maxPrice=300", 2),
        ("/api/products?minPrice=650", 1),
        ("/api/products?search=LAMP", 1),
        ("/api/products?search=working%20order", 4),
        ("/api/products?search=%25", 0),
        ("/api/products?category=Electronics&condition=Good&maxPrice=1000", 1),
    ];

    for (uri, expected) in cases {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["products"].as_array().unwrap().len(), expected, "{}", uri);
    }
}

#[actix_web::test]
async fn test_unknown_filter_values_are_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for (uri, field) in [
        ("/api/products?category=Cars", "category"),
        ("/api/products?condition=Mint", "condition"),
        ("/api/products?minPrice=cheap", "minPrice"),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"]["fields"][0]["field"], field);
    }
}

#[actix_web::test]
async fn test_owner_listing_edge_cases() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let uri = format!("/api/users/{}/products", Uuid::new_v4());
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["products"].as_array().unwrap().is_empty());

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users/not-a-uuid/products")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_deactivated_listings_are_hidden() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (_, user_id) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;
    let owner = Uuid::parse_str(&user_id).unwrap();

    let view = ctx
        .state
        .listing_service
        .create(owner, new_listing("Old Sofa", "40", "Furniture", "Poor"), Vec::new())
        .await
        .unwrap();
    ctx.state
        .listing_service
        .deactivate(owner, view.listing.id)
        .await
        .unwrap();

    for uri in ["/api/products".to_string(), format!("/api/users/{}/products", user_id)] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert!(body["products"].as_array().unwrap().is_empty(), "{}", uri);
    }
}
