//! Shared-secret check for the dashboard API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use dragonkeep_common::API_KEY_HEADER;
use tracing::debug;

use crate::response::ApiError;
use crate::state::AppState;

/// Reject any request whose `x-api-key` does not equal the configured secret
///
/// Mounted as a route layer, so it runs before extractors and handlers.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if state.api_secret().matches(key) => Ok(next.run(request).await),
        _ => {
            debug!(
                path = %request.uri().path(),
                header_present = presented.is_some(),
                "Rejected request without a valid API key"
            );
            Err(ApiError::Unauthorized)
        }
    }
}
