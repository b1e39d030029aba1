//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use dragonkeep_core::{MemberTier, Revenue, RevenueSource, Snowflake};

// ============================================================================
// Community Responses
// ============================================================================

/// Guild counters for the dashboard header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsResponse {
    pub members: u64,
    pub viewers: u64,
    pub subs: u64,
    /// Not tracked; always zero
    pub warns: u64,
    /// Not tracked; always zero
    pub bans: u64,
}

/// One row of the recent members list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummaryResponse {
    pub id: Snowflake,
    pub name: String,
    pub role: MemberTier,
}

// ============================================================================
// Finance Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueResponse {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub source: RevenueSource,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Revenue> for RevenueResponse {
    fn from(revenue: Revenue) -> Self {
        Self {
            id: revenue.id,
            date: revenue.date,
            source: revenue.source,
            amount: revenue.amount,
            description: revenue.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// "YYYY-MM"
    pub month: String,
    pub total: f64,
}

/// Ledger aggregates for the finance page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummaryResponse {
    pub total: f64,
    /// Current UTC calendar month
    pub month_total: f64,
    pub entries: usize,
    pub best_source: Option<RevenueSource>,
    pub by_source: BTreeMap<RevenueSource, f64>,
    /// Latest six months with entries, oldest first
    pub monthly: Vec<MonthlyTotal>,
}

// ============================================================================
// Misc Responses
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Liveness probe body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the gateway currently manages at least one guild
    pub guild_connected: bool,
}
