use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::server::types::HealthResponse;
use crate::types::AppState;

/// GET /api/health
/// Reports how many courses the snapshot holds
pub async fn get_health(State(s): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            courses_loaded: s.catalog.len(),
            loaded_at: s.catalog.loaded_at(),
        }),
    )
}
