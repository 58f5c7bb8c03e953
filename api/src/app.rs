//! Application state and factory
//!
//! This module wires the core services into a shared state and provides the
//! factory for creating the Actix-web application. Both the binary and the
//! integration tests build the app through [`create_app`].

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use ns_core::errors::DomainError;
use ns_core::repositories::{ListingRepository, UserRepository};
use ns_core::services::auth::{AuthService, AuthServiceConfig};
use ns_core::services::listing::{ImageStore, ListingService, UploadPolicy};
use ns_core::services::seed::SeedService;
use ns_core::services::token::{TokenService, TokenServiceConfig};
use ns_shared::config::AppConfig;

use crate::handlers::error::{handle_domain_error, json_error_handler, query_error_handler};
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{
    auth::{login::login, me::me, register::register},
    products::{by_owner::products_by_owner, create::create_product, list::list_products},
    seed::seed,
};

/// Application state that holds shared services
pub struct AppState<U, L, I>
where
    U: UserRepository,
    L: ListingRepository,
    I: ImageStore,
{
    pub auth_service: Arc<AuthService<U>>,
    pub listing_service: Arc<ListingService<U, L, I>>,
    /// Present only when demo seeding is enabled
    pub seed_service: Option<Arc<SeedService<U, L>>>,
    pub token_service: Arc<TokenService>,
    pub upload_policy: UploadPolicy,
    pub config: AppConfig,
}

impl<U, L, I> AppState<U, L, I>
where
    U: UserRepository,
    L: ListingRepository,
    I: ImageStore,
{
    /// Build every service on top of the given stores
    pub fn new(users: Arc<U>, listings: Arc<L>, images: Arc<I>, config: AppConfig) -> Self {
        let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(
            &config.auth.jwt,
        )));
        let upload_policy = UploadPolicy::from(&config.upload);

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&token_service),
            AuthServiceConfig::from(&config.auth),
        ));

        let listing_service = Arc::new(ListingService::new(
            Arc::clone(&users),
            Arc::clone(&listings),
            images,
            upload_policy,
        ));

        let seed_service = config.seed.enabled.then(|| {
            Arc::new(SeedService::new(
                Arc::clone(&users),
                Arc::clone(&listings),
                config.auth.bcrypt_cost,
            ))
        });

        Self {
            auth_service,
            listing_service,
            seed_service,
            token_service,
            upload_policy,
            config,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, L, I>(
    app_state: web::Data<AppState<U, L, I>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    I: ImageStore + 'static,
{
    let cors = create_cors(&app_state.config.cors);
    let auth = JwtAuth::new(Arc::clone(&app_state.token_service));
    let seed_enabled = app_state.seed_service.is_some();
    let uploads = app_state.config.upload.clone();

    let json_config = web::JsonConfig::default()
        .limit(app_state.config.server.max_json_payload)
        .error_handler(json_error_handler);
    let query_config = web::QueryConfig::default().error_handler(query_error_handler);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config)
        .app_data(query_config)
        // Middleware: the last one wrapped runs first
        .wrap(cors)
        .wrap(TracingLogger::default())
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, L, I>))
                        .route("/login", web::post().to(login::<U, L, I>))
                        .route("/me", web::get().to(me::<U, L, I>).wrap(auth.clone())),
                )
                .route("/products", web::get().to(list_products::<U, L, I>))
                .route(
                    "/products",
                    web::post().to(create_product::<U, L, I>).wrap(auth),
                )
                .route(
                    "/products/user/{id}",
                    web::get().to(products_by_owner::<U, L, I>),
                )
                .route(
                    "/users/{id}/products",
                    web::get().to(products_by_owner::<U, L, I>),
                )
                .configure(|cfg| {
                    if seed_enabled {
                        cfg.route("/seed", web::post().to(seed::<U, L, I>));
                    }
                }),
        )
        // Stored listing images
        .service(actix_files::Files::new(
            &uploads.public_prefix,
            uploads.directory.clone(),
        ))
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "neighborswap-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    handle_domain_error(DomainError::not_found("Route"))
}
