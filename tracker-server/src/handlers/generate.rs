use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;
use storage::TrackedMessage;
use tracing::{error, info, instrument, warn};
use tracker_core::{known_ip, TrackerError};

use super::client_ip;
use crate::dto::{pixel_path, GenerateRequest, GenerateResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/pixel/generate`: mint a tracking id and persist an empty record.
#[instrument(skip_all)]
pub async fn generate_pixel(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        warn!(error = %rejection, "Rejected pixel generation body");
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let (subject, recipient) = validate(request).map_err(|e| {
        warn!(error = %e, "Pixel generation rejected");
        ApiError::from(e)
    })?;

    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let message = TrackedMessage::new(subject, recipient, known_ip(&ip));

    if let Err(e) = state.store.create(&message).await {
        error!(
            subject = %message.subject,
            recipient = %message.recipient,
            error = %e,
            "Error generating tracking pixel"
        );
        return Err(ApiError::internal("Failed to generate tracking pixel", e));
    }

    info!(
        tracking_id = %message.tracking_id,
        subject = %message.subject,
        recipient = %message.recipient,
        sender_ip = ?message.sender_ip,
        "Tracking pixel generated"
    );

    Ok(Json(GenerateResponse {
        success: true,
        pixel_url: pixel_path(&message.tracking_id),
        tracking_id: message.tracking_id,
        message: "Tracking pixel generated successfully",
    }))
}

/// Both fields are required and must not be blank.
fn validate(request: GenerateRequest) -> Result<(String, String), TrackerError> {
    let subject = request.subject.filter(|s| !s.trim().is_empty());
    let recipient = request.recipient.filter(|s| !s.trim().is_empty());

    match (subject, recipient) {
        (Some(subject), Some(recipient)) => Ok((subject, recipient)),
        (subject, recipient) => {
            let mut missing = Vec::new();
            if subject.is_none() {
                missing.push("subject");
            }
            if recipient.is_none() {
                missing.push("recipient");
            }
            Err(TrackerError::missing_fields(&missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(subject: Option<&str>, recipient: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            subject: subject.map(str::to_string),
            recipient: recipient.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_ok() {
        let (subject, recipient) = validate(request(Some("Hi"), Some("a@b.c"))).unwrap();
        assert_eq!(subject, "Hi");
        assert_eq!(recipient, "a@b.c");
    }

    #[test]
    fn test_validate_missing_recipient() {
        let err = validate(request(Some("Hi"), None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: recipient"
        );
    }

    #[test]
    fn test_validate_blank_fields() {
        let err = validate(request(Some("  "), Some(""))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: subject and recipient"
        );
    }
}
