//! PlatformGateway over the serenity HTTP client and cache

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{Cache, ChannelId, GuildId, Http, RoleId, UserId};
use tracing::{debug, instrument};

use dragonkeep_core::{
    DomainError, GatewayResult, GuildMember, PlatformGateway, PlatformUser, Snowflake,
};

use crate::convert;

/// Page size of the member list endpoint
const MEMBERS_PAGE_SIZE: u64 = 1000;

/// Audit log reason attached to role changes
const AUDIT_REASON: &str = "Rules reaction";

/// Discord connection as seen by the services
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }
}

#[async_trait]
impl PlatformGateway for SerenityGateway {
    fn primary_guild(&self) -> Option<Snowflake> {
        self.cache
            .guilds()
            .into_iter()
            .map(|guild_id| Snowflake::new(guild_id.get()))
            .min()
    }

    #[instrument(skip(self))]
    async fn fetch_user(&self, user_id: Snowflake) -> GatewayResult<PlatformUser> {
        let user = self
            .http
            .get_user(UserId::new(user_id.get()))
            .await
            .map_err(|e| convert::platform_error(e, || DomainError::UserNotFound(user_id)))?;
        Ok(convert::user(&user))
    }

    #[instrument(skip(self))]
    async fn fetch_channel_guild(&self, channel_id: Snowflake) -> GatewayResult<Option<Snowflake>> {
        let channel = self
            .http
            .get_channel(ChannelId::new(channel_id.get()))
            .await
            .map_err(|e| convert::platform_error(e, || DomainError::ChannelNotFound(channel_id)))?;
        Ok(channel
            .guild()
            .map(|guild_channel| Snowflake::new(guild_channel.guild_id.get())))
    }

    #[instrument(skip(self))]
    async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> GatewayResult<GuildMember> {
        let member = self
            .http
            .get_member(GuildId::new(guild_id.get()), UserId::new(user_id.get()))
            .await
            .map_err(|e| {
                convert::platform_error(e, || DomainError::MemberNotFound { guild_id, user_id })
            })?;
        Ok(convert::member(&member))
    }

    #[instrument(skip(self))]
    async fn fetch_members(&self, guild_id: Snowflake) -> GatewayResult<Vec<GuildMember>> {
        let gid = GuildId::new(guild_id.get());
        let mut members = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let chunk = gid
                .members(&self.http, Some(MEMBERS_PAGE_SIZE), after)
                .await
                .map_err(|e| convert::platform_error(e, || DomainError::GuildNotFound(guild_id)))?;
            let page_len = chunk.len();
            after = chunk.last().map(|m| m.user.id);
            members.extend(chunk.iter().map(convert::member));

            if page_len < MEMBERS_PAGE_SIZE as usize {
                break;
            }
        }

        debug!(count = members.len(), "Fetched guild members");
        Ok(members)
    }

    #[instrument(skip(self))]
    async fn grant_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> GatewayResult<()> {
        self.http
            .add_member_role(
                GuildId::new(guild_id.get()),
                UserId::new(user_id.get()),
                RoleId::new(role_id.get()),
                Some(AUDIT_REASON),
            )
            .await
            .map_err(|e| {
                convert::platform_error(e, || DomainError::MemberNotFound { guild_id, user_id })
            })
    }

    #[instrument(skip(self))]
    async fn revoke_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> GatewayResult<()> {
        self.http
            .remove_member_role(
                GuildId::new(guild_id.get()),
                UserId::new(user_id.get()),
                RoleId::new(role_id.get()),
                Some(AUDIT_REASON),
            )
            .await
            .map_err(|e| {
                convert::platform_error(e, || DomainError::MemberNotFound { guild_id, user_id })
            })
    }
}
