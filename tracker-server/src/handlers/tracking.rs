//! Tracking record endpoints: listing with stats, lookup, delete, self-open purge.

use axum::extract::{Path, State};
use axum::Json;
use storage::TrackingStats;
use tracing::{error, info, instrument};

use crate::dto::{DeleteResponse, DetailResponse, ListResponse, PurgeResponse, TrackedMessageView};
use crate::error::ApiError;
use crate::state::{AppState, LIST_LIMIT};

/// `GET /api/tracking/all`: newest messages first, stats exclude self-opens.
#[instrument(skip_all)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
    let messages = state.store.list_recent(LIST_LIMIT).await.map_err(|e| {
        error!(error = %e, "Error fetching all tracking data");
        ApiError::internal("Failed to fetch tracking data", e)
    })?;

    let stats = TrackingStats::from_messages(&messages);
    info!(
        total_emails = stats.total_emails,
        opened_emails = stats.opened_emails,
        "Listed tracking data"
    );

    Ok(Json(ListResponse {
        success: true,
        stats,
        emails: messages.into_iter().map(TrackedMessageView::from).collect(),
    }))
}

/// `GET /api/tracking/{id}`
#[instrument(skip(state))]
pub async fn get_tracking(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
) -> Result<Json<DetailResponse>, ApiError> {
    let message = state
        .store
        .find_by_tracking_id(&tracking_id)
        .await
        .map_err(|e| {
            error!(tracking_id = %tracking_id, error = %e, "Error fetching tracking data");
            ApiError::internal("Failed to fetch tracking data", e)
        })?
        .ok_or_else(ApiError::tracking_not_found)?;

    Ok(Json(DetailResponse {
        success: true,
        data: message.into(),
    }))
}

/// `DELETE /api/tracking/{id}`
#[instrument(skip(state))]
pub async fn delete_tracking(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state.store.delete(&tracking_id).await.map_err(|e| {
        error!(tracking_id = %tracking_id, error = %e, "Error deleting tracking data");
        ApiError::internal("Failed to delete tracking data", e)
    })?;

    if !deleted {
        return Err(ApiError::tracking_not_found());
    }

    info!(tracking_id = %tracking_id, "Tracking record deleted");
    Ok(Json(DeleteResponse {
        success: true,
        message: "Tracking record deleted",
    }))
}

/// `POST /api/tracking/{id}/remove-self-opens`
#[instrument(skip(state))]
pub async fn remove_self_opens(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
) -> Result<Json<PurgeResponse>, ApiError> {
    let outcome = state
        .store
        .remove_self_opens(&tracking_id)
        .await
        .map_err(|e| {
            error!(tracking_id = %tracking_id, error = %e, "Error removing self-opens");
            ApiError::from_storage("Failed to remove self-opens", e)
        })?;

    Ok(Json(outcome.into()))
}
