//! Guild statistics
//!
//! Counts are taken over a freshly fetched member list of the primary guild.

use dragonkeep_core::GuildMember;
use tracing::{debug, instrument};

use crate::dto::StatsResponse;

use super::context::{RoleSyncSettings, ServiceContext};
use super::error::{ServiceError, ServiceResult};

/// Stats service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Member, viewer and sub counts of the primary guild
    ///
    /// Returns an all-zero snapshot when the connection manages no guild.
    #[instrument(skip(self))]
    pub async fn guild_stats(&self) -> ServiceResult<StatsResponse> {
        let gateway = self.ctx.gateway();
        let Some(guild_id) = gateway.primary_guild() else {
            debug!("No managed guild; returning empty stats");
            return Ok(StatsResponse::default());
        };

        let members = gateway
            .fetch_members(guild_id)
            .await
            .map_err(ServiceError::member_list)?;
        Ok(tally(&members, self.ctx.settings()))
    }
}

/// Count members by role; bots are included in the total
pub fn tally(members: &[GuildMember], settings: &RoleSyncSettings) -> StatsResponse {
    let count = |role_id| members.iter().filter(|m| m.has_role(role_id)).count() as u64;

    StatsResponse {
        members: members.len() as u64,
        viewers: count(settings.viewer_role_id),
        subs: count(settings.sub_role_id),
        warns: 0,
        bans: 0,
    }
}
