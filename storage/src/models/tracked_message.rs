//! Tracked message model for persistence.
//!
//! Maps to the `tracked_messages` table; `opens` is loaded from `open_events`
//! in insertion order. Open count and first/last open times are computed from
//! `opens` on demand and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracker_core::generate_tracking_id;

use super::OpenEvent;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrackedMessage {
    pub tracking_id: String,
    pub subject: String,
    pub recipient: String,
    pub sent_at: DateTime<Utc>,
    pub sender_ip: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub opens: Vec<OpenEvent>,
}

impl TrackedMessage {
    /// Creates a new record with a freshly minted tracking id, current timestamp
    /// and no opens.
    pub fn new(subject: String, recipient: String, sender_ip: Option<String>) -> Self {
        Self {
            tracking_id: generate_tracking_id(),
            subject,
            recipient,
            sent_at: Utc::now(),
            sender_ip,
            opens: Vec::new(),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opens.len()
    }

    pub fn first_open_at(&self) -> Option<DateTime<Utc>> {
        self.opens.first().map(|e| e.opened_at)
    }

    pub fn last_open_at(&self) -> Option<DateTime<Utc>> {
        self.opens.last().map(|e| e.opened_at)
    }

    /// Opens not attributed to the sender.
    pub fn non_self_opens(&self) -> impl Iterator<Item = &OpenEvent> {
        self.opens.iter().filter(|e| !e.is_self)
    }

    pub fn has_non_self_open(&self) -> bool {
        self.opens.iter().any(|e| !e.is_self)
    }
}
