//! `GET /pixel/{id}.png`: serve the tracking pixel and log the open.
//!
//! Only `{id}.png` paths record an open. Whatever happens while recording it
//! (unknown id, unparsable path, store down) the response is the transparent
//! PNG with status 200. A broken image in a mail client would give the
//! tracker away.

use std::net::SocketAddr;

use axum::extract::rejection::PathRejection;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use storage::{OpenEvent, StorageError};
use tracing::{debug, info, instrument, warn};
use tracker_core::{transparent_pixel, NO_CACHE_CONTROL, PNG_CONTENT_TYPE};

use super::{client_ip, header_str};
use crate::state::AppState;

#[instrument(skip_all)]
pub async fn serve_pixel(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Response {
    match path {
        Ok(Path(file)) => match file.strip_suffix(".png") {
            Some(tracking_id) => {
                let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
                let user_agent = header_str(&headers, header::USER_AGENT.as_str());

                if let Err(e) = record_open(&state, tracking_id, user_agent, &ip).await {
                    warn!(tracking_id = %tracking_id, ip = %ip, error = %e, "Failed to record open");
                }
            }
            None => {
                debug!(file = %file, "Pixel path without .png suffix, open not recorded");
            }
        },
        Err(rejection) => {
            warn!(error = %rejection, "Unparsable pixel path");
        }
    }

    pixel_response()
}

/// Looks up the message and appends one open event. Returns whether an event was stored.
async fn record_open(
    state: &AppState,
    tracking_id: &str,
    user_agent: Option<&str>,
    ip: &str,
) -> Result<bool, StorageError> {
    if tracking_id.is_empty() {
        return Ok(false);
    }

    let Some(message) = state.store.find_by_tracking_id(tracking_id).await? else {
        debug!(tracking_id = %tracking_id, "Pixel fetched for unknown tracking id");
        return Ok(false);
    };

    let event = OpenEvent::new(user_agent, ip, message.sender_ip.as_deref());
    let appended = state.store.append_open(tracking_id, &event).await?;

    if appended {
        info!(
            tracking_id = %tracking_id,
            subject = %message.subject,
            recipient = %message.recipient,
            ip = %event.ip,
            is_self = event.is_self,
            "Email opened"
        );
    }
    Ok(appended)
}

/// The 200 image response with caching disabled.
pub fn pixel_response() -> Response {
    let body = transparent_pixel();

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PNG_CONTENT_TYPE));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE_CONTROL));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));

    (StatusCode::OK, headers, body).into_response()
}
