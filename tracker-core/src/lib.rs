//! # tracker-core
//!
//! Domain primitives for the email open tracker: error taxonomy, tracing
//! initialization, tracking-id minting, client IP resolution with the self-open
//! rule, and the transparent pixel. Transport-agnostic; used by storage
//! and tracker-server.

pub mod error;
pub mod ip;
pub mod logger;
pub mod pixel;
pub mod tracking_id;

pub use error::{Result, TrackerError};
pub use ip::{first_forwarded, is_self_open, known_ip, ClientIpSources, UNKNOWN};
pub use logger::{init_tracing, DEFAULT_LOG_FILTER};
pub use pixel::{transparent_pixel, NO_CACHE_CONTROL, PNG_CONTENT_TYPE};
pub use tracking_id::{generate_tracking_id, TRACKING_ID_LEN};
