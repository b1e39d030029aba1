//! Route definitions
//!
//! `/health` is public; everything under `/api` sits behind the API key check.

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get},
    Router,
};

use crate::handlers::{community, finance, health};
use crate::middleware::require_api_key;
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api", api_routes(state))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// Authenticated dashboard routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(community_routes())
        .merge(finance_routes())
        .route_layer(from_fn_with_state(state, require_api_key))
}

/// Guild stats and members
fn community_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(community::get_stats))
        .route("/members", get(community::get_members))
}

/// Revenue ledger
fn finance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/finance/revenues",
            get(finance::list_revenues).post(finance::create_revenue),
        )
        .route("/finance/revenues/:revenue_id", delete(finance::delete_revenue))
        .route("/finance/summary", get(finance::get_summary))
}
