use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{OpenEvent, PurgeOutcome, TrackedMessage};

/// Durable record store for tracked messages and their open events.
///
/// Implementations must make `append_open` a single atomic append so that
/// concurrent fetches of the same pixel are all recorded.
#[async_trait]
pub trait TrackingStore: Send + Sync {
    /// Persists a new message. Fails with `AlreadyExists` if the tracking id is taken.
    async fn create(&self, message: &TrackedMessage) -> Result<(), StorageError>;

    /// Loads a message with its opens in insertion order.
    async fn find_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Option<TrackedMessage>, StorageError>;

    /// Appends one event to the message's opens. Returns `false` for an unknown id.
    async fn append_open(&self, tracking_id: &str, event: &OpenEvent)
        -> Result<bool, StorageError>;

    /// Up to `limit` messages, most recently sent first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<TrackedMessage>, StorageError>;

    /// Deletes a message and its opens. Returns `false` for an unknown id.
    async fn delete(&self, tracking_id: &str) -> Result<bool, StorageError>;

    /// Removes every self-open of a message in one atomic update.
    ///
    /// Fails with `NotFound` for an unknown id; removing nothing is not an error.
    async fn remove_self_opens(&self, tracking_id: &str) -> Result<PurgeOutcome, StorageError>;
}
