//! Guild stats and member list handlers

use axum::{extract::State, Json};
use dragonkeep_service::dto::{MemberSummaryResponse, StatsResponse};
use dragonkeep_service::{MemberService, StatsService};

use crate::response::ApiResult;
use crate::state::AppState;

/// Member and role counters of the primary guild
///
/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let stats = StatsService::new(state.service_context()).guild_stats().await?;
    Ok(Json(stats))
}

/// Ten most recently joined human members
///
/// GET /api/members
pub async fn get_members(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<MemberSummaryResponse>>> {
    let members = MemberService::new(state.service_context())
        .recent_members()
        .await?;
    Ok(Json(members))
}
