//! Aggregate statistics over a set of tracked messages.
//!
//! Self-opens are excluded everywhere: a message only counts as opened when it
//! has at least one open from someone other than the sender.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::TrackedMessage;

/// Percentage of messages with at least one non-self open.
///
/// Serialized as a one-decimal string (`"33.3"`), or as the number `0` when
/// there were no messages at all.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OpenRate(pub Option<f64>);

impl OpenRate {
    pub fn percent(&self) -> f64 {
        self.0.unwrap_or(0.0)
    }
}

impl std::fmt::Display for OpenRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(p) => write!(f, "{:.1}", p),
            None => write!(f, "0"),
        }
    }
}

impl Serialize for OpenRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(_) => serializer.serialize_str(&self.to_string()),
            None => serializer.serialize_u8(0),
        }
    }
}

impl<'de> Deserialize<'de> for OpenRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s
                .parse::<f64>()
                .map(|p| OpenRate(Some(p)))
                .map_err(|_| de::Error::custom(format!("invalid open rate: {}", s))),
            Raw::Number(n) if n == 0.0 => Ok(OpenRate(None)),
            Raw::Number(n) => Ok(OpenRate(Some(n))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStats {
    pub total_emails: u64,
    /// Non-self opens across all messages.
    pub total_opens: u64,
    pub opened_emails: u64,
    pub unopened_emails: u64,
    pub open_rate: OpenRate,
}

impl TrackingStats {
    pub fn from_messages(messages: &[TrackedMessage]) -> Self {
        let total_emails = messages.len() as u64;
        let total_opens = messages
            .iter()
            .map(|m| m.non_self_opens().count() as u64)
            .sum();
        let opened_emails = messages.iter().filter(|m| m.has_non_self_open()).count() as u64;
        let open_rate = if total_emails == 0 {
            OpenRate(None)
        } else {
            OpenRate(Some(opened_emails as f64 / total_emails as f64 * 100.0))
        };

        Self {
            total_emails,
            total_opens,
            opened_emails,
            unopened_emails: total_emails - opened_emails,
            open_rate,
        }
    }
}
