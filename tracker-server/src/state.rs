//! Shared handler state.

use std::sync::Arc;

use storage::TrackingStore;

/// Listing cap for `GET /api/tracking/all`.
pub const LIST_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TrackingStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TrackingStore>) -> Self {
        Self { store }
    }
}
