//! Reading the multipart body of `POST /api/products`
//!
//! Text parts fill a [`NewListing`]; every `images` part becomes an
//! [`ImageUpload`]. Files are buffered in memory one at a time and a file is
//! dropped as soon as it grows past the per-file ceiling, so an oversized
//! upload never sits in memory whole.

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::StreamExt;

use ns_core::domain::value_objects::{ImageUpload, NewListing};
use ns_core::errors::{DomainResult, UploadError, ValidationError};
use ns_core::services::listing::UploadPolicy;

/// Form part carrying listing images
const IMAGE_FIELD: &str = "images";

/// Ceiling for a single text part
const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

/// Parsed product form
pub(super) struct ProductForm {
    pub listing: NewListing,
    pub images: Vec<ImageUpload>,
}

pub(super) async fn read_product_form(
    mut payload: Multipart,
    policy: &UploadPolicy,
) -> DomainResult<ProductForm> {
    let mut listing = NewListing::default();
    let mut images = Vec::new();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(malformed)?;
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            if images.len() >= policy.max_files {
                return Err(UploadError::TooManyFiles {
                    max: policy.max_files,
                    actual: images.len() + 1,
                }
                .into());
            }
            images.push(read_image(&mut field, policy).await?);
            continue;
        }

        let Some(bytes) = read_limited(&mut field, MAX_TEXT_FIELD_BYTES).await? else {
            return Err(ValidationError::field(name, "Value is too long").into());
        };
        let value = String::from_utf8(bytes)
            .map_err(|_| ValidationError::field(name.clone(), "Value must be UTF-8 text"))?;

        match name.as_str() {
            "name" => listing.name = value,
            "description" => listing.description = value,
            "price" => listing.price = value,
            "category" => listing.category = value,
            "condition" => listing.condition = value,
            "location" => listing.location = Some(value),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(ProductForm { listing, images })
}

async fn read_image(field: &mut Field, policy: &UploadPolicy) -> DomainResult<ImageUpload> {
    let filename = field
        .content_disposition()
        .and_then(|disposition| disposition.get_filename())
        .unwrap_or_default()
        .to_string();
    let content_type = field
        .content_type()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();

    match read_limited(field, policy.max_file_bytes).await? {
        Some(bytes) => Ok(ImageUpload::new(filename, content_type, bytes)),
        None => {
            // Type is checked before size, same as for buffered uploads
            let probe = ImageUpload::new(filename.clone(), content_type, Vec::new());
            if UploadPolicy::is_allowed_type(&probe) {
                Err(UploadError::FileTooLarge {
                    filename,
                    limit: policy.max_file_bytes,
                }
                .into())
            } else {
                Err(UploadError::UnsupportedType { filename }.into())
            }
        }
    }
}

/// Collect a part's bytes, or `None` once it exceeds `limit`
async fn read_limited(field: &mut Field, limit: usize) -> DomainResult<Option<Vec<u8>>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(bytes))
}

fn malformed(error: MultipartError) -> ValidationError {
    tracing::debug!(error = %error, "Malformed multipart body");
    ValidationError::field("body", "Expected a multipart/form-data body")
}
