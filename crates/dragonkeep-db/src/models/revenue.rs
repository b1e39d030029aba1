//! Revenue database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use dragonkeep_core::{DomainError, Revenue, RevenueSource};

/// Database model for the revenues table
#[derive(Debug, Clone, FromRow)]
pub struct RevenueModel {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub source: String,
    pub amount: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RevenueModel> for Revenue {
    type Error = DomainError;

    fn try_from(model: RevenueModel) -> Result<Self, Self::Error> {
        let source = RevenueSource::parse(&model.source).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "revenue {} has unknown source '{}'",
                model.id, model.source
            ))
        })?;

        Ok(Revenue {
            id: model.id,
            date: model.date,
            source,
            amount: model.amount,
            description: model.description,
            created_at: model.created_at,
        })
    }
}
