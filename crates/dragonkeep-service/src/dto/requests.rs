//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use dragonkeep_core::RevenueSource;

/// New ledger entry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRevenueRequest {
    /// When the money was earned (RFC 3339)
    pub date: DateTime<Utc>,

    pub source: RevenueSource,

    #[validate(range(
        min = 0.01,
        max = 1_000_000_000.0,
        message = "Amount must be between 0.01 and 1000000000"
    ))]
    pub amount: f64,

    #[validate(length(max = 280, message = "Description must be at most 280 characters"))]
    pub description: Option<String>,
}
