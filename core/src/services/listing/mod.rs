//! Listing service module
//!
//! Creation with image uploads, filtered browsing, per-owner collections
//! and owner-only deactivation.

mod image_store;
mod service;
mod upload;


pub use image_store::{ImageStore, MockImageStore};
pub use service::ListingService;
pub use upload::UploadPolicy;
