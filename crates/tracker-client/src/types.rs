//! Wire types returned by the tracker backend (camelCase JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub subject: &'a str,
    pub recipient: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPixel {
    pub tracking_id: String,
    /// Path relative to the backend, e.g. `/pixel/<id>.png`.
    pub pixel_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRecord {
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    pub ip: String,
    pub is_self: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    pub tracking_id: String,
    pub subject: String,
    pub recipient: String,
    pub sent_at: DateTime<Utc>,
    pub sender_ip: Option<String>,
    #[serde(default)]
    pub opens: Vec<OpenRecord>,
    #[serde(default)]
    pub open_count: usize,
    pub first_open_at: Option<DateTime<Utc>>,
    pub last_open_at: Option<DateTime<Utc>>,
}

/// `openRate` is a one-decimal string, or the number `0` for an empty listing.
///
/// Mirrors the server's stats wire shape without linking the storage crate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OpenRate {
    Percent(String),
    Zero(u8),
}

impl std::fmt::Display for OpenRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenRate::Percent(p) => write!(f, "{}", p),
            OpenRate::Zero(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStats {
    pub total_emails: u64,
    pub total_opens: u64,
    pub opened_emails: u64,
    pub unopened_emails: u64,
    pub open_rate: OpenRate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingOverview {
    pub stats: TrackingStats,
    pub emails: Vec<TrackingRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeSummary {
    pub removed_count: u64,
    pub remaining_opens: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailEnvelope {
    pub data: TrackingRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
