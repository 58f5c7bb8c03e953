//! MySQL repository implementations

mod errors;
mod listing_filter;
mod listing_repository_impl;
mod user_repository_impl;

pub use listing_repository_impl::MySqlListingRepository;
pub use user_repository_impl::MySqlUserRepository;
