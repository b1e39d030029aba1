//! Recent members read model

use std::cmp::Ordering;

use dragonkeep_core::{GuildMember, MemberTier, Snowflake};
use tracing::instrument;

use crate::dto::MemberSummaryResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Rows returned by the members endpoint
pub const RECENT_MEMBERS_LIMIT: usize = 10;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Most recently joined human members of the primary guild
    #[instrument(skip(self))]
    pub async fn recent_members(&self) -> ServiceResult<Vec<MemberSummaryResponse>> {
        let gateway = self.ctx.gateway();
        let Some(guild_id) = gateway.primary_guild() else {
            return Ok(Vec::new());
        };

        let members = gateway
            .fetch_members(guild_id)
            .await
            .map_err(ServiceError::member_list)?;
        Ok(recent(
            members,
            self.ctx.settings().sub_role_id,
            RECENT_MEMBERS_LIMIT,
        ))
    }
}

/// Drop bots, newest join first, unknown join times last, then truncate
pub fn recent(
    members: Vec<GuildMember>,
    sub_role_id: Snowflake,
    limit: usize,
) -> Vec<MemberSummaryResponse> {
    let mut humans: Vec<GuildMember> = members.into_iter().filter(|m| !m.is_bot()).collect();
    humans.sort_by(|a, b| {
        let by_join = match (a.joined_at, b.joined_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_join.then_with(|| a.user_id().cmp(&b.user_id()))
    });

    humans
        .into_iter()
        .take(limit)
        .map(|member| MemberSummaryResponse {
            id: member.user_id(),
            role: MemberTier::classify(&member, sub_role_id),
            name: member.user.username,
        })
        .collect()
}
