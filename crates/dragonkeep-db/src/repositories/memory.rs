//! In-memory revenue ledger
//!
//! Used when no database is configured. Entries live as long as the process.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use dragonkeep_core::{RepoResult, Revenue, RevenueRepository};

/// Process-local implementation of RevenueRepository
#[derive(Default)]
pub struct InMemoryRevenueRepository {
    // insertion order; newest last
    entries: RwLock<Vec<Revenue>>,
}

impl InMemoryRevenueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevenueRepository for InMemoryRevenueRepository {
    async fn list(&self) -> RepoResult<Vec<Revenue>> {
        let mut entries: Vec<Revenue> = self.entries.read().iter().rev().cloned().collect();
        // stable: entries sharing a date keep newest-inserted first
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    async fn insert(&self, revenue: &Revenue) -> RepoResult<()> {
        self.entries.write().push(revenue.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        Ok(entries.len() != before)
    }
}
