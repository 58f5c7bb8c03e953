//! Local-disk image store
//!
//! Files land in the configured upload directory as
//! `<unix millis>-<8 hex chars>.<ext>` and are served by the API under the
//! public prefix (default `/uploads`).

use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use ns_core::domain::value_objects::ImageUpload;
use ns_core::errors::UploadError;
use ns_core::services::ImageStore;
use ns_shared::config::UploadConfig;

use crate::InfrastructureError;

/// Image store writing into a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    directory: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    /// Create the store, making sure the directory exists
    pub async fn new(
        directory: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Result<Self, InfrastructureError> {
        let directory = directory.into();
        tokio::fs::create_dir_all(&directory).await?;

        tracing::info!(directory = %directory.display(), "Image store ready");

        Ok(Self {
            directory,
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn from_config(config: &UploadConfig) -> Result<Self, InfrastructureError> {
        Self::new(config.directory.clone(), config.public_prefix.clone()).await
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_name(image: &ImageUpload) -> String {
        let extension = image.extension().unwrap_or_else(|| "bin".to_string());
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            &suffix[..8],
            extension
        )
    }

    /// Path on disk for a URL this store issued, if it is one
    fn path_for(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(&self.public_prefix)?.strip_prefix('/')?;
        let is_plain_name = !name.is_empty()
            && !name.contains('/')
            && !name.contains('\\')
            && !name.starts_with('.');
        is_plain_name.then(|| self.directory.join(name))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, image: &ImageUpload) -> Result<String, UploadError> {
        let name = Self::file_name(image);
        let path = self.directory.join(&name);

        tokio::fs::write(&path, &image.bytes).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write image");
            UploadError::Storage {
                message: "could not write image".to_string(),
            }
        })?;

        tracing::debug!(file = %name, bytes = image.size(), "Image stored");

        Ok(format!("{}/{}", self.public_prefix, name))
    }

    async fn remove(&self, url: &str) -> Result<(), UploadError> {
        let Some(path) = self.path_for(url) else {
            tracing::warn!(url = %url, "Refusing to remove image outside the store");
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(UploadError::Storage {
                message: format!("could not remove image: {}", e),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (LocalImageStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("uploads"), "/uploads/")
            .await
            .unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_public_url() {
        let (store, _dir) = store().await;
        let image = ImageUpload::new("Photo.PNG", "image/png", vec![1, 2, 3]);

        let url = store.store(&image).await.unwrap();

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));
        let name = url.trim_start_matches("/uploads/");
        let (millis, rest) = name.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(rest.len(), "abcdef12.png".len());

        let bytes = tokio::fs::read(store.directory().join(name)).await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_names_are_unique() {
        let (store, _dir) = store().await;
        let image = ImageUpload::new("a.jpg", "image/jpeg", vec![0]);

        let first = store.store(&image).await.unwrap();
        let second = store.store(&image).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_remove_deletes_file_and_tolerates_missing() {
        let (store, _dir) = store().await;
        let url = store
            .store(&ImageUpload::new("a.gif", "image/gif", vec![0]))
            .await
            .unwrap();
        let path = store.path_for(&url).unwrap();
        assert!(path.exists());

        store.remove(&url).await.unwrap();
        assert!(!path.exists());

        store.remove(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_ignores_foreign_paths() {
        let (store, _dir) = store().await;
        assert!(store.path_for("/uploads/../secret").is_none());
        assert!(store.path_for("/elsewhere/a.png").is_none());
        assert!(store.path_for("https://images.example.com/a.png").is_none());
        store.remove("/uploads/../secret").await.unwrap();
    }
}
