//! Storage crate: tracked-message persistence and the store abstraction.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – TrackedMessage, OpenEvent, TrackingStats, PurgeOutcome
//! - [`repository`] – TrackingStore trait
//! - [`tracking_repo`] – TrackingRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod repository;
mod sqlite_pool;
mod tracking_repo;


pub use error::StorageError;
pub use models::{OpenEvent, OpenRate, PurgeOutcome, TrackedMessage, TrackingStats};
pub use repository::TrackingStore;
pub use sqlite_pool::SqlitePoolManager;
pub use tracking_repo::TrackingRepository;
