//! Image persistence seam used by the listing service

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::value_objects::ImageUpload;
use crate::errors::UploadError;

/// Stores validated image bytes and hands back their public URL
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist one image; returns the URL clients fetch it from
    async fn store(&self, image: &ImageUpload) -> Result<String, UploadError>;

    /// Remove a previously stored image
    async fn remove(&self, url: &str) -> Result<(), UploadError>;
}

/// In-memory image store for tests and local demos
#[derive(Clone, Default)]
pub struct MockImageStore {
    stored: Arc<RwLock<HashSet<String>>>,
    /// Number of successful stores after which every store fails
    fail_after: Arc<RwLock<Option<usize>>>,
    writes: Arc<AtomicUsize>,
}

impl MockImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `count` stores succeed, then fail the rest
    pub async fn fail_after(&self, count: usize) {
        *self.fail_after.write().await = Some(count);
    }

    /// URLs currently held
    pub async fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.stored.read().await.iter().cloned().collect();
        urls.sort();
        urls
    }

    /// Total successful stores, including ones later removed
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn store(&self, image: &ImageUpload) -> Result<String, UploadError> {
        if let Some(limit) = *self.fail_after.read().await {
            if self.write_count() >= limit {
                return Err(UploadError::Storage {
                    message: "image store unavailable".to_string(),
                });
            }
        }

        let extension = image.extension().unwrap_or_else(|| "bin".to_string());
        let url = format!("/uploads/{}.{}", Uuid::new_v4().simple(), extension);

        self.stored.write().await.insert(url.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(url)
    }

    async fn remove(&self, url: &str) -> Result<(), UploadError> {
        self.stored.write().await.remove(url);
        Ok(())
    }
}
