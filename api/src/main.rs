use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ns_api::{create_app, AppState};
use ns_infra::{DatabasePool, LocalImageStore, MySqlListingRepository, MySqlUserRepository};
use ns_shared::config::{AppConfig, LogFormat, LoggingConfig};

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);
    config.validate().map_err(anyhow::Error::msg)?;

    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development secret");
    }

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting NeighborSwap API"
    );

    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;
    match pool.ping().await {
        Ok(latency) => tracing::info!(
            latency_ms = latency.as_millis() as u64,
            pool = %pool.statistics(),
            "Database reachable"
        ),
        Err(e) => tracing::warn!(error = %e, "Database ping failed; continuing"),
    }
    match pool.missing_tables().await {
        Ok(missing) if !missing.is_empty() => {
            tracing::warn!(?missing, "Tables missing; apply infra/schema.sql")
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Could not inspect the schema"),
    }

    let users = Arc::new(MySqlUserRepository::new(pool.pool().clone()));
    let listings = Arc::new(MySqlListingRepository::new(pool.pool().clone()));
    let images = Arc::new(
        LocalImageStore::from_config(&config.upload)
            .await
            .context("Failed to prepare the upload directory")?,
    );

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let keep_alive = Duration::from_secs(config.server.keep_alive);
    if config.seed.enabled {
        tracing::info!("Demo seeding enabled at POST /api/seed");
    }

    let state = web::Data::new(AppState::new(users, listings, images, config));

    tracing::info!(address = %bind_address, "Listening");

    let mut server = HttpServer::new(move || create_app(state.clone())).keep_alive(keep_alive);
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}
