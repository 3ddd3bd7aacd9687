//! API error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use storage::StorageError;
use thiserror::Error;
use tracker_core::TrackerError;

/// Errors returned by the JSON API handlers.
///
/// The pixel endpoint never produces one of these; it always answers with an image.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Unknown tracking id.
    #[error("{0}")]
    NotFound(String),

    /// Store failure. `context` is what the client sees; `source` is only logged.
    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: TrackerError,
    },
}

impl ApiError {
    pub fn tracking_not_found() -> Self {
        ApiError::NotFound("Tracking ID not found".to_string())
    }

    pub fn internal(context: &'static str, source: impl Into<TrackerError>) -> Self {
        ApiError::Internal {
            context,
            source: source.into(),
        }
    }

    /// Maps a store error, turning `NotFound` into 404 and everything else into 500
    /// with the given client-facing context.
    pub fn from_storage(context: &'static str, e: StorageError) -> Self {
        match TrackerError::from(e) {
            TrackerError::NotFound(_) => ApiError::tracking_not_found(),
            other => ApiError::internal(context, other),
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::Validation(msg) => ApiError::Validation(msg),
            TrackerError::NotFound(_) => ApiError::tracking_not_found(),
            other => ApiError::internal("Internal server error", other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Store errors are not echoed to clients.
        let message = match &self {
            Self::Validation(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Internal { context, .. } => (*context).to_string(),
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
