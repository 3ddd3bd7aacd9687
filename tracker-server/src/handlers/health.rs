use axum::Json;
use chrono::Utc;

use crate::dto::HealthResponse;

/// `GET /health`: liveness probe used by the extension popup.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
