//! Image upload policy

use ns_shared::config::UploadConfig;

use crate::domain::entities::listing::MAX_IMAGES;
use crate::domain::value_objects::ImageUpload;
use crate::errors::UploadError;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];
const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Limits applied to listing images before anything is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_files: usize,
    pub max_file_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_files: MAX_IMAGES,
            max_file_bytes: 5_000_000,
        }
    }
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            // A listing never holds more than MAX_IMAGES, whatever the config says
            max_files: config.max_files.min(MAX_IMAGES),
            max_file_bytes: config.max_file_bytes,
        }
    }
}

impl UploadPolicy {
    /// Whether the file name and declared MIME type are both accepted
    pub fn is_allowed_type(image: &ImageUpload) -> bool {
        let extension_ok = image
            .extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));
        let mime = image.content_type.trim().to_ascii_lowercase();
        let mime_ok = ALLOWED_MIME_TYPES.contains(&mime.as_str());
        extension_ok && mime_ok
    }

    /// Check count, type and size of every image
    pub fn validate(&self, images: &[ImageUpload]) -> Result<(), UploadError> {
        if images.len() > self.max_files {
            return Err(UploadError::TooManyFiles {
                max: self.max_files,
                actual: images.len(),
            });
        }

        for image in images {
            if !Self::is_allowed_type(image) {
                return Err(UploadError::UnsupportedType {
                    filename: image.filename.clone(),
                });
            }
            if image.size() > self.max_file_bytes {
                return Err(UploadError::FileTooLarge {
                    filename: image.filename.clone(),
                    limit: self.max_file_bytes,
                });
            }
        }

        Ok(())
    }
}
