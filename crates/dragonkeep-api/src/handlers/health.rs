//! Health check handler

use axum::{extract::State, Json};
use dragonkeep_service::dto::HealthResponse;

use crate::state::AppState;

/// Liveness probe; no API key required
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        guild_connected: state.service_context().gateway().primary_guild().is_some(),
    })
}
