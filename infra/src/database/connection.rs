//! MySQL pool shared by the repositories

use std::str::FromStr;
use std::time::{Duration, Instant};

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};
use tracing::log::LevelFilter;

use ns_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Tables the repositories expect, see `schema.sql`
const REQUIRED_TABLES: [&str; 2] = ["users", "listings"];

/// Owns the sqlx pool for the lifetime of the server
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect using `config`
    ///
    /// A malformed URL is a configuration error and never reaches the network.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid DATABASE_URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(
                LevelFilter::Warn,
                Duration::from_millis(config.slow_query_threshold),
            );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(options)
            .await?;

        tracing::info!(max_connections = config.max_connections, "MySQL pool ready");
        Ok(Self { pool })
    }

    /// Handle for the sqlx repositories
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round trip `SELECT 1` and report how long it took
    pub async fn ping(&self) -> Result<Duration, InfrastructureError> {
        let started = Instant::now();
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(started.elapsed())
    }

    /// Tables from `schema.sql` that are not present in the connected database
    pub async fn missing_tables(&self) -> Result<Vec<&'static str>, InfrastructureError> {
        let mut missing = Vec::new();
        for table in REQUIRED_TABLES {
            let found: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = DATABASE() AND table_name = ?",
            )
            .bind(table)
            .fetch_one(&self.pool)
            .await?;
            if found == 0 {
                missing.push(table);
            }
        }
        Ok(missing)
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
            max: self.pool.options().get_max_connections(),
        }
    }

    /// Wait for checked-out connections to return, then close them
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("MySQL pool closed");
    }
}

/// Snapshot of pool usage for startup logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub size: u32,
    pub idle: usize,
    pub max: u32,
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} open, {} idle", self.size, self.max, self.idle)
    }
}
