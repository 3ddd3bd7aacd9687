//! Request and response bodies of the JSON API (camelCase on the wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::{PurgeOutcome, TrackedMessage, TrackingStats};

/// `POST /api/pixel/generate` body. `emailSubject` is accepted for older extension builds.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(alias = "emailSubject")]
    pub subject: Option<String>,
    pub recipient: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub tracking_id: String,
    pub pixel_url: String,
    pub message: &'static str,
}

/// A tracked message plus the fields derived from its opens.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedMessageView {
    #[serde(flatten)]
    pub message: TrackedMessage,
    pub open_count: usize,
    pub first_open_at: Option<DateTime<Utc>>,
    pub last_open_at: Option<DateTime<Utc>>,
}

impl From<TrackedMessage> for TrackedMessageView {
    fn from(message: TrackedMessage) -> Self {
        Self {
            open_count: message.open_count(),
            first_open_at: message.first_open_at(),
            last_open_at: message.last_open_at(),
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub stats: TrackingStats,
    pub emails: Vec<TrackedMessageView>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub success: bool,
    pub data: TrackedMessageView,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeResponse {
    pub success: bool,
    pub removed_count: u64,
    pub remaining_opens: u64,
}

impl From<PurgeOutcome> for PurgeResponse {
    fn from(outcome: PurgeOutcome) -> Self {
        Self {
            success: true,
            removed_count: outcome.removed,
            remaining_opens: outcome.remaining,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Relative pixel URL handed back to the caller.
pub fn pixel_path(tracking_id: &str) -> String {
    format!("/pixel/{}.png", tracking_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::OpenEvent;

    #[test]
    fn test_generate_request_accepts_email_subject_alias() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"emailSubject":"Hi","recipient":"a@b.c"}"#).unwrap();
        assert_eq!(req.subject.as_deref(), Some("Hi"));

        let req: GenerateRequest = serde_json::from_str(r#"{"subject":"Hi"}"#).unwrap();
        assert!(req.recipient.is_none());
    }

    #[test]
    fn test_view_includes_derived_fields() {
        let mut message = TrackedMessage::new("Hi".into(), "a@b.c".into(), None);
        message.opens.push(OpenEvent::new(Some("ua"), "9.9.9.9", None));

        let json = serde_json::to_value(TrackedMessageView::from(message.clone())).unwrap();

        assert_eq!(json["trackingId"], message.tracking_id.as_str());
        assert_eq!(json["subject"], "Hi");
        assert_eq!(json["senderIp"], serde_json::Value::Null);
        assert_eq!(json["openCount"], 1);
        assert_eq!(json["opens"][0]["ip"], "9.9.9.9");
        assert!(json["firstOpenAt"].is_string());
        assert_eq!(json["firstOpenAt"], json["lastOpenAt"]);
    }

    #[test]
    fn test_pixel_path() {
        assert_eq!(pixel_path("abc"), "/pixel/abc.png");
    }
}
