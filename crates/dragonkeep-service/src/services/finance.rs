//! Revenue ledger
//!
//! Manually entered stream income and the aggregates the finance page charts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dragonkeep_core::{Revenue, RevenueSource};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CreateRevenueRequest, MonthlyTotal, RevenueResponse, RevenueSummaryResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Months shown in the monthly chart
const SUMMARY_MONTHS: usize = 6;

/// Finance service
pub struct FinanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FinanceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All entries, newest date first
    #[instrument(skip(self))]
    pub async fn list_revenues(&self) -> ServiceResult<Vec<RevenueResponse>> {
        let revenues = self.ctx.revenue_repo().list().await?;
        Ok(revenues.into_iter().map(RevenueResponse::from).collect())
    }

    /// Validate and store a new entry
    #[instrument(skip(self, request))]
    pub async fn add_revenue(&self, request: CreateRevenueRequest) -> ServiceResult<RevenueResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        if !request.amount.is_finite() {
            return Err(ServiceError::validation("Amount must be a finite number"));
        }

        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let revenue = Revenue::new(request.date, request.source, request.amount, description);

        self.ctx.revenue_repo().insert(&revenue).await?;
        info!(
            revenue_id = %revenue.id,
            source = %revenue.source,
            amount = revenue.amount,
            "Revenue recorded"
        );

        Ok(RevenueResponse::from(revenue))
    }

    /// Delete an entry by its id as given in the URL
    #[instrument(skip(self))]
    pub async fn delete_revenue(&self, raw_id: &str) -> ServiceResult<()> {
        let id = Uuid::parse_str(raw_id)
            .map_err(|_| ServiceError::validation(format!("Invalid revenue id: {raw_id}")))?;

        if !self.ctx.revenue_repo().delete(id).await? {
            return Err(ServiceError::not_found("Revenue", id.to_string()));
        }

        info!(revenue_id = %id, "Revenue deleted");
        Ok(())
    }

    /// Ledger aggregates as of now
    #[instrument(skip(self))]
    pub async fn summary(&self) -> ServiceResult<RevenueSummaryResponse> {
        let revenues = self.ctx.revenue_repo().list().await?;
        Ok(summarize(&revenues, Utc::now()))
    }
}

/// Aggregate the ledger relative to `now`
pub fn summarize(revenues: &[Revenue], now: DateTime<Utc>) -> RevenueSummaryResponse {
    let current_month = now.format("%Y-%m").to_string();

    let mut by_source: BTreeMap<RevenueSource, f64> = BTreeMap::new();
    let mut by_month: BTreeMap<String, f64> = BTreeMap::new();
    let mut total = 0.0;
    let mut month_total = 0.0;

    for revenue in revenues {
        total += revenue.amount;
        *by_source.entry(revenue.source).or_default() += revenue.amount;

        let month = revenue.month_key();
        if month == current_month {
            month_total += revenue.amount;
        }
        *by_month.entry(month).or_default() += revenue.amount;
    }

    // ties go to the source listed first
    let best_source = by_source
        .iter()
        .fold(None::<(RevenueSource, f64)>, |best, (&source, &amount)| match best {
            Some((_, top)) if top >= amount => best,
            _ => Some((source, amount)),
        })
        .map(|(source, _)| source);

    let skip = by_month.len().saturating_sub(SUMMARY_MONTHS);
    let monthly = by_month
        .into_iter()
        .skip(skip)
        .map(|(month, total)| MonthlyTotal {
            month,
            total: round_cents(total),
        })
        .collect();

    RevenueSummaryResponse {
        total: round_cents(total),
        month_total: round_cents(month_total),
        entries: revenues.len(),
        best_source,
        by_source: by_source
            .into_iter()
            .map(|(source, amount)| (source, round_cents(amount)))
            .collect(),
        monthly,
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
