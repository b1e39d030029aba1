//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::Revenue;
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Revenue Repository
// ============================================================================

#[async_trait]
pub trait RevenueRepository: Send + Sync {
    /// All entries, newest date first (ties: most recently inserted first)
    async fn list(&self) -> RepoResult<Vec<Revenue>>;

    /// Append an entry
    async fn insert(&self, revenue: &Revenue) -> RepoResult<()>;

    /// Delete an entry, returning false when the id is unknown
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}
