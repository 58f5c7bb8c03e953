//! Storage module - listing image persistence

mod local;

pub use local::LocalImageStore;
