//! Role sync service
//!
//! Turns reactions on the rules message into viewer role changes. Each event is
//! run through a fixed sequence of guards; only an event that passes all of them
//! reaches the platform, and then with at most one role mutation.

use std::fmt;

use dragonkeep_core::{PlatformUser, ReactionEvent, ReactionKind, Snowflake};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Why an event was dropped before any role change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    WrongChannel,
    WrongMessage,
    BotActor,
    WrongEmoji,
    OutsideGuild,
}

impl IgnoreReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WrongChannel => "wrong_channel",
            Self::WrongMessage => "wrong_message",
            Self::BotActor => "bot_actor",
            Self::WrongEmoji => "wrong_emoji",
            Self::OutsideGuild => "outside_guild",
        }
    }
}

/// Result of evaluating one reaction event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSyncOutcome {
    Ignored(IgnoreReason),
    /// The member was already in the target state
    AlreadySynced,
    Granted,
    Revoked,
    /// Un-react seen while revocation is switched off
    RevocationDisabled,
}

impl RoleSyncOutcome {
    /// True if the platform was asked to change a role
    pub fn mutated(self) -> bool {
        matches!(self, Self::Granted | Self::Revoked)
    }
}

impl fmt::Display for RoleSyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored(reason) => write!(f, "ignored:{}", reason.as_str()),
            Self::AlreadySynced => f.write_str("already_synced"),
            Self::Granted => f.write_str("granted"),
            Self::Revoked => f.write_str("revoked"),
            Self::RevocationDisabled => f.write_str("revocation_disabled"),
        }
    }
}

/// Role sync service
pub struct RoleSyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleSyncService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Evaluate a reaction event and apply at most one role change
    ///
    /// # Errors
    /// Returns the gateway error if resolving the payload, fetching the member
    /// or mutating the role fails. No role change is attempted after a failure.
    #[instrument(
        skip(self, event),
        fields(
            kind = event.kind.as_str(),
            channel_id = %event.channel_id,
            message_id = %event.message_id,
            user_id = %event.actor_id(),
            partial = event.is_partial(),
        )
    )]
    pub async fn handle_reaction(&self, event: ReactionEvent) -> ServiceResult<RoleSyncOutcome> {
        let settings = self.ctx.settings();

        if event.channel_id != settings.rules_channel_id {
            return Ok(RoleSyncOutcome::Ignored(IgnoreReason::WrongChannel));
        }

        let (actor, guild_id) = self.resolve(&event).await?;

        if event.message_id != settings.rules_message_id {
            info!("Reaction on a non-rules message in the rules channel");
            return Ok(RoleSyncOutcome::Ignored(IgnoreReason::WrongMessage));
        }

        if actor.bot {
            return Ok(RoleSyncOutcome::Ignored(IgnoreReason::BotActor));
        }

        if !event.emoji.is_glyph(&settings.approval_emoji) {
            return Ok(RoleSyncOutcome::Ignored(IgnoreReason::WrongEmoji));
        }

        let Some(guild_id) = guild_id else {
            return Ok(RoleSyncOutcome::Ignored(IgnoreReason::OutsideGuild));
        };

        match event.kind {
            ReactionKind::Add => self.grant_viewer(guild_id, &actor).await,
            ReactionKind::Remove => self.revoke_viewer(guild_id, &actor).await,
        }
    }

    /// Same as [`Self::handle_reaction`], but failures end here
    ///
    /// This is the event-handler boundary: a failed event is logged and
    /// dropped, never retried.
    pub async fn process(&self, event: ReactionEvent) -> Option<RoleSyncOutcome> {
        let kind = event.kind;
        let user_id = event.actor_id();
        match self.handle_reaction(event).await {
            Ok(outcome) => {
                debug!(user_id = %user_id, outcome = %outcome, "Reaction evaluated");
                Some(outcome)
            }
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    kind = kind.as_str(),
                    error = %e,
                    "Role sync failed; event dropped"
                );
                None
            }
        }
    }

    /// Materialize the actor and the guild of a possibly partial payload
    async fn resolve(
        &self,
        event: &ReactionEvent,
    ) -> ServiceResult<(PlatformUser, Option<Snowflake>)> {
        let gateway = self.ctx.gateway();

        let actor = event
            .actor
            .clone()
            .resolve_with(|user_id| gateway.fetch_user(user_id))
            .await?;

        let guild_id = match event.guild_id {
            Some(guild_id) => Some(guild_id),
            None => gateway.fetch_channel_guild(event.channel_id).await?,
        };

        Ok((actor, guild_id))
    }

    async fn grant_viewer(
        &self,
        guild_id: Snowflake,
        actor: &PlatformUser,
    ) -> ServiceResult<RoleSyncOutcome> {
        let viewer_role_id = self.ctx.settings().viewer_role_id;
        let gateway = self.ctx.gateway();

        let member = gateway.fetch_member(guild_id, actor.id).await?;
        if member.has_role(viewer_role_id) {
            return Ok(RoleSyncOutcome::AlreadySynced);
        }

        gateway.grant_role(guild_id, actor.id, viewer_role_id).await?;
        info!(
            guild_id = %guild_id,
            user_id = %actor.id,
            username = %actor.username,
            role_id = %viewer_role_id,
            "Viewer role granted"
        );

        Ok(RoleSyncOutcome::Granted)
    }

    async fn revoke_viewer(
        &self,
        guild_id: Snowflake,
        actor: &PlatformUser,
    ) -> ServiceResult<RoleSyncOutcome> {
        let settings = self.ctx.settings();
        if !settings.revoke_on_remove {
            return Ok(RoleSyncOutcome::RevocationDisabled);
        }

        let gateway = self.ctx.gateway();
        let member = gateway.fetch_member(guild_id, actor.id).await?;
        if !member.has_role(settings.viewer_role_id) {
            return Ok(RoleSyncOutcome::AlreadySynced);
        }

        gateway
            .revoke_role(guild_id, actor.id, settings.viewer_role_id)
            .await?;
        info!(
            guild_id = %guild_id,
            user_id = %actor.id,
            username = %actor.username,
            role_id = %settings.viewer_role_id,
            "Viewer role revoked"
        );

        Ok(RoleSyncOutcome::Revoked)
    }
}
