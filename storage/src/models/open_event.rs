//! Open event model: one row per pixel fetch.
//!
//! Maps to the `open_events` table. Never mutated after insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracker_core::{is_self_open, UNKNOWN};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OpenEvent {
    #[serde(rename = "timestamp")]
    pub opened_at: DateTime<Utc>,
    pub user_agent: String,
    pub ip: String,
    pub is_self: bool,
}

impl OpenEvent {
    /// Creates an event for a fetch happening now.
    ///
    /// A missing or blank user agent becomes `"unknown"`. `is_self` is set when
    /// `sender_ip` is known and equals `ip`.
    pub fn new(user_agent: Option<&str>, ip: &str, sender_ip: Option<&str>) -> Self {
        let user_agent = user_agent
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string();
        Self {
            opened_at: Utc::now(),
            user_agent,
            is_self: is_self_open(sender_ip, ip),
            ip: ip.to_string(),
        }
    }
}
