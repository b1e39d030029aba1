//! Revenue entity - one manually entered line of the stream ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a revenue line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueSource {
    Bits,
    Sub,
    GiftSub,
    Raid,
    Donation,
    Other,
}

impl RevenueSource {
    pub const ALL: [RevenueSource; 6] = [
        Self::Bits,
        Self::Sub,
        Self::GiftSub,
        Self::Raid,
        Self::Donation,
        Self::Other,
    ];

    /// Stable storage/wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bits => "bits",
            Self::Sub => "sub",
            Self::GiftSub => "gift_sub",
            Self::Raid => "raid",
            Self::Donation => "donation",
            Self::Other => "other",
        }
    }

    /// Parse the storage/wire name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.as_str() == s)
    }
}

impl std::fmt::Display for RevenueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger entry
#[derive(Debug, Clone, PartialEq)]
pub struct Revenue {
    pub id: Uuid,
    /// Date the money was earned (user supplied)
    pub date: DateTime<Utc>,
    pub source: RevenueSource,
    pub amount: f64,
    pub description: Option<String>,
    /// Insertion time, used to order entries sharing a date
    pub created_at: DateTime<Utc>,
}

impl Revenue {
    /// Create a new entry with a fresh id
    pub fn new(
        date: DateTime<Utc>,
        source: RevenueSource,
        amount: f64,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            source,
            amount,
            description,
            created_at: Utc::now(),
        }
    }

    /// "YYYY-MM" bucket of the entry date
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
