//! Listing image upload and demo seeding configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{env_or, Environment};

/// Where and how listing images are accepted and stored
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Directory the local image store writes into
    pub directory: PathBuf,

    /// Public URL prefix under which stored images are served
    pub public_prefix: String,

    /// Per-file size ceiling in bytes
    pub max_file_bytes: usize,

    /// Maximum number of images per listing
    pub max_files: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uploads"),
            public_prefix: String::from("/uploads"),
            max_file_bytes: 5_000_000,
            max_files: 5,
        }
    }
}

impl UploadConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            directory: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.directory),
            public_prefix: defaults.public_prefix,
            max_file_bytes: env_or("UPLOAD_MAX_FILE_BYTES", defaults.max_file_bytes),
            max_files: env_or("UPLOAD_MAX_FILES", defaults.max_files),
        }
    }
}

/// Demo data seeding switch
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SeedConfig {
    /// Whether `POST /api/seed` is routed
    pub enabled: bool,
}

impl SeedConfig {
    /// Seeding is on everywhere except production
    pub fn for_environment(env: Environment) -> Self {
        Self {
            enabled: !env.is_production(),
        }
    }

    /// Environment default overridden by `SEED_ENABLED`
    pub fn from_env(env: Environment) -> Self {
        Self {
            enabled: env_or("SEED_ENABLED", !env.is_production()),
        }
    }
}
