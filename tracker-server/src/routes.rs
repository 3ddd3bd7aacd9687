//! Router assembly. Paths are a compatibility contract with the browser extension.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{
    delete_tracking, generate_pixel, get_tracking, health, list_all, remove_self_opens,
    serve_pixel,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pixel/generate", post(generate_pixel))
        // `{id}.png` is matched as one segment; the handler strips the suffix and
        // answers any other file name with the image without logging an open.
        .route("/pixel/:file", get(serve_pixel))
        .route("/api/tracking/all", get(list_all))
        .route(
            "/api/tracking/:id",
            get(get_tracking).delete(delete_tracking),
        )
        .route(
            "/api/tracking/:id/remove-self-opens",
            post(remove_self_opens),
        )
        .with_state(state)
}
