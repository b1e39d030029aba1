//! Revenue ledger handlers

use axum::{
    extract::{Path, State},
    Json,
};
use dragonkeep_service::dto::{
    CreateRevenueRequest, OkResponse, RevenueResponse, RevenueSummaryResponse,
};
use dragonkeep_service::FinanceService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/finance/revenues
pub async fn list_revenues(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RevenueResponse>>> {
    let revenues = FinanceService::new(state.service_context())
        .list_revenues()
        .await?;
    Ok(Json(revenues))
}

/// POST /api/finance/revenues
pub async fn create_revenue(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRevenueRequest>,
) -> ApiResult<Created<Json<RevenueResponse>>> {
    let revenue = FinanceService::new(state.service_context())
        .add_revenue(request)
        .await?;
    Ok(Created(Json(revenue)))
}

/// DELETE /api/finance/revenues/{id}
pub async fn delete_revenue(
    State(state): State<AppState>,
    Path(revenue_id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    FinanceService::new(state.service_context())
        .delete_revenue(&revenue_id)
        .await?;
    Ok(Json(OkResponse::new()))
}

/// GET /api/finance/summary
pub async fn get_summary(
    State(state): State<AppState>,
) -> ApiResult<Json<RevenueSummaryResponse>> {
    let summary = FinanceService::new(state.service_context()).summary().await?;
    Ok(Json(summary))
}
