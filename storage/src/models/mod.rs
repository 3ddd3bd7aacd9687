mod open_event;
mod purge_outcome;
mod tracked_message;
mod tracking_stats;

pub use open_event::OpenEvent;
pub use purge_outcome::PurgeOutcome;
pub use tracked_message::TrackedMessage;
pub use tracking_stats::{OpenRate, TrackingStats};
