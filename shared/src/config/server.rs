//! HTTP listener and CORS settings

use serde::{Deserialize, Serialize};

use super::env_or;

const DEFAULT_PORT: u16 = 5000;

/// Listener settings for `HttpServer`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// 0 lets actix pick one worker per core
    #[serde(default)]
    pub workers: usize,

    /// Seconds an idle keep-alive connection is held open
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,

    /// Upper bound for JSON request bodies (register, login)
    #[serde(default = "default_json_limit")]
    pub max_json_payload: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            workers: 0,
            keep_alive: default_keep_alive(),
            max_json_payload: default_json_limit(),
        }
    }
}

impl ServerConfig {
    /// `SERVER_HOST`, `SERVER_PORT` (or the platform's `PORT`) and
    /// `SERVER_WORKERS`
    pub fn from_env() -> Self {
        let base = Self::default();
        let port = ["SERVER_PORT", "PORT"]
            .iter()
            .find_map(|key| std::env::var(key).ok())
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(base.port);

        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(base.host),
            port,
            workers: env_or("SERVER_WORKERS", base.workers),
            keep_alive: env_or("SERVER_KEEP_ALIVE", base.keep_alive),
            max_json_payload: base.max_json_payload,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Origins allowed to call the API from a browser
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Exact origins, or `*` for any
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    #[serde(default)]
    pub allow_credentials: bool,

    /// Preflight cache lifetime in seconds
    #[serde(default = "default_preflight_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_credentials: false,
            max_age: default_preflight_max_age(),
        }
    }
}

impl CorsConfig {
    /// Any origin with credentials, for local front-end work
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
            max_age: 3600,
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_or(Self::default())
    }

    /// `ALLOWED_ORIGINS` (comma separated) and `CORS_MAX_AGE` layered over `base`
    pub fn from_env_or(base: Self) -> Self {
        let allowed_origins = match std::env::var("ALLOWED_ORIGINS") {
            Ok(value) if !split_origins(&value).is_empty() => split_origins(&value),
            _ => base.allowed_origins,
        };

        Self {
            allowed_origins,
            allow_credentials: base.allow_credentials,
            max_age: env_or("CORS_MAX_AGE", base.max_age),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn default_keep_alive() -> u64 {
    75
}

fn default_json_limit() -> usize {
    64 * 1024
}

fn default_preflight_max_age() -> usize {
    86400
}
