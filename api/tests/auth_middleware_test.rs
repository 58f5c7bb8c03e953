//! Integration tests for JWT authentication middleware

mod common;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use serde_json::Value;
use uuid::Uuid;

use common::{bearer, register_request, session_of, test_config, MultipartForm, TestContext};
use ns_api::create_app;
use ns_api::middleware::auth::AuthContext;
use ns_core::services::token::{TokenService, TokenServiceConfig};

#[actix_web::test]
async fn test_missing_header_is_unauthenticated() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthenticated");
}

#[actix_web::test]
async fn test_non_bearer_scheme_is_unauthenticated() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", "Basic YW5hOnNlY3JldA=="))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_scheme_name_is_case_insensitive() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let (token, user_id) =
        session_of(test::call_service(&app, register_request("Ana", "ana@example.com").to_request()).await).await;

    for scheme in ["bearer", "BEARER", "Bearer"] {
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", format!("{} {}", scheme, token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", scheme);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["id"], user_id.as_str());
    }
}

#[actix_web::test]
async fn test_garbage_token_is_forbidden() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer("invalid-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
}

#[actix_web::test]
async fn test_token_from_other_secret_is_forbidden() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let foreign = TokenService::new(TokenServiceConfig {
        jwt_secret: "some-other-secret".to_string(),
        ..TokenServiceConfig::from(&test_config().auth.jwt)
    });
    let token = foreign.issue(Uuid::new_v4(), "ana@example.com").unwrap().token;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_expired_token_is_forbidden() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let expired = TokenService::new(TokenServiceConfig {
        expiry_seconds: -3600,
        ..TokenServiceConfig::from(&test_config().auth.jwt)
    });
    let token = expired.issue(Uuid::new_v4(), "ana@example.com").unwrap().token;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
}

#[actix_web::test]
async fn test_valid_token_for_missing_user_is_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let token = ctx
        .state
        .token_service
        .issue(Uuid::new_v4(), "ghost@example.com")
        .unwrap()
        .token;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_product_requires_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let (content_type, body) = MultipartForm::bike().finish();
    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = common::create_product_request("not.a.jwt", MultipartForm::bike()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    assert_eq!(ctx.images.write_count(), 0);
}

#[actix_web::test]
async fn test_public_routes_ignore_missing_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_auth_context_extractor_without_middleware() {
    async fn protected_handler(auth: AuthContext) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "user_id": auth.user_id.to_string() }))
    }

    let app =
        test::init_service(App::new().route("/protected", web::get().to(protected_handler))).await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthenticated");
}
