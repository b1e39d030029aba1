//! Service context - dependency container for services
//!
//! Holds the platform gateway, the revenue ledger, and the role settings that
//! every service reads.

use std::sync::Arc;

use dragonkeep_common::RoleSyncConfig;
use dragonkeep_core::{PlatformGateway, RevenueRepository, Snowflake};

use super::error::{ServiceError, ServiceResult};

/// Rules-reaction settings used by the role sync and the member read models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSyncSettings {
    pub rules_channel_id: Snowflake,
    pub rules_message_id: Snowflake,
    pub viewer_role_id: Snowflake,
    pub sub_role_id: Snowflake,
    pub approval_emoji: String,
    pub revoke_on_remove: bool,
}

impl From<&RoleSyncConfig> for RoleSyncSettings {
    fn from(config: &RoleSyncConfig) -> Self {
        Self {
            rules_channel_id: config.rules_channel_id,
            rules_message_id: config.rules_message_id,
            viewer_role_id: config.viewer_role_id,
            sub_role_id: config.sub_role_id,
            approval_emoji: config.approval_emoji.clone(),
            revoke_on_remove: config.revoke_on_remove,
        }
    }
}

/// Service context containing all dependencies
///
/// Cheap to clone; the gateway and the ledger are shared trait objects.
#[derive(Clone)]
pub struct ServiceContext {
    gateway: Arc<dyn PlatformGateway>,
    revenue_repo: Arc<dyn RevenueRepository>,
    settings: Arc<RoleSyncSettings>,
}

impl ServiceContext {
    pub fn new(
        gateway: Arc<dyn PlatformGateway>,
        revenue_repo: Arc<dyn RevenueRepository>,
        settings: RoleSyncSettings,
    ) -> Self {
        Self {
            gateway,
            revenue_repo,
            settings: Arc::new(settings),
        }
    }

    /// Get the community platform gateway
    pub fn gateway(&self) -> &dyn PlatformGateway {
        self.gateway.as_ref()
    }

    /// Get the revenue ledger
    pub fn revenue_repo(&self) -> &dyn RevenueRepository {
        self.revenue_repo.as_ref()
    }

    pub fn settings(&self) -> &RoleSyncSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("gateway", &"dyn PlatformGateway")
            .field("revenue_repo", &"dyn RevenueRepository")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    gateway: Option<Arc<dyn PlatformGateway>>,
    revenue_repo: Option<Arc<dyn RevenueRepository>>,
    settings: Option<RoleSyncSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gateway(mut self, gateway: Arc<dyn PlatformGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn revenue_repo(mut self, repo: Arc<dyn RevenueRepository>) -> Self {
        self.revenue_repo = Some(repo);
        self
    }

    pub fn settings(mut self, settings: RoleSyncSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.gateway
                .ok_or_else(|| ServiceError::internal("gateway is required"))?,
            self.revenue_repo
                .ok_or_else(|| ServiceError::internal("revenue_repo is required"))?,
            self.settings
                .ok_or_else(|| ServiceError::internal("role sync settings are required"))?,
        ))
    }
}
