//! Client side of the email tracker: a typed HTTP client for the backend API
//! and the flow that injects a tracking pixel into a message being composed.

pub mod client;
pub mod compose;
pub mod error;
pub mod types;

pub use client::TrackerClient;
pub use compose::{
    inject_tracking_pixel, pixel_html, ComposeNotifier, ComposeObserver, ComposeSession,
    ComposeSurface, DEFAULT_SUBJECT,
};
pub use error::{ClientError, Result};
pub use types::{
    GeneratedPixel, HealthStatus, OpenRate, OpenRecord, PurgeSummary, TrackingOverview,
    TrackingRecord, TrackingStats,
};
