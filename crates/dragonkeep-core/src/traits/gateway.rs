//! Platform gateway port
//!
//! Everything the services need from the community platform connection. The
//! Discord adapter implements it over the serenity client; tests substitute an
//! in-memory fake.

use async_trait::async_trait;

use crate::entities::{GuildMember, PlatformUser};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for gateway calls
pub type GatewayResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait PlatformGateway: Send + Sync {
    /// First-available guild this connection manages, if any
    fn primary_guild(&self) -> Option<Snowflake>;

    /// Fetch a user by id
    async fn fetch_user(&self, user_id: Snowflake) -> GatewayResult<PlatformUser>;

    /// Resolve the guild owning a channel (None for DM channels)
    async fn fetch_channel_guild(&self, channel_id: Snowflake) -> GatewayResult<Option<Snowflake>>;

    /// Fetch one member fresh from the platform
    async fn fetch_member(&self, guild_id: Snowflake, user_id: Snowflake)
        -> GatewayResult<GuildMember>;

    /// Refresh and return the full member list of a guild
    async fn fetch_members(&self, guild_id: Snowflake) -> GatewayResult<Vec<GuildMember>>;

    /// Add a role to a member
    async fn grant_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> GatewayResult<()>;

    /// Remove a role from a member
    async fn revoke_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> GatewayResult<()>;
}
