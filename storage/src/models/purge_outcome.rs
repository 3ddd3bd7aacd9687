//! Result of removing self-opens from one message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeOutcome {
    /// Self-open events deleted.
    pub removed: u64,
    /// Events left on the message afterwards.
    pub remaining: u64,
}
