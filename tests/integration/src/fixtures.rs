//! Test fixtures
//!
//! An in-memory platform gateway that records every call, plus builders for
//! configuration and reaction events.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dragonkeep_common::{AppConfig, ConfigError};
use dragonkeep_core::{
    DomainError, Emoji, GatewayResult, GuildMember, Partial, PlatformGateway, PlatformUser,
    ReactionEvent, ReactionKind, Snowflake,
};
use dragonkeep_service::RoleSyncSettings;
use parking_lot::Mutex;

pub const GUILD_ID: Snowflake = Snowflake::new(1_200_000_000_000_000_001);
pub const RULES_CHANNEL_ID: Snowflake = Snowflake::new(1_200_000_000_000_000_010);
pub const RULES_MESSAGE_ID: Snowflake = Snowflake::new(1_200_000_000_000_000_020);
pub const VIEWER_ROLE_ID: Snowflake = Snowflake::new(1_200_000_000_000_000_030);
pub const SUB_ROLE_ID: Snowflake = Snowflake::new(1_200_000_000_000_000_040);
pub const OTHER_CHANNEL_ID: Snowflake = Snowflake::new(1_200_000_000_000_000_011);
pub const OTHER_MESSAGE_ID: Snowflake = Snowflake::new(1_200_000_000_000_000_021);

pub const API_SECRET: &str = "test-hoard-key";
pub const APPROVAL_EMOJI: &str = "✅";

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchUser(Snowflake),
    FetchChannelGuild(Snowflake),
    FetchMember(Snowflake, Snowflake),
    FetchMembers(Snowflake),
    Grant(Snowflake, Snowflake, Snowflake),
    Revoke(Snowflake, Snowflake, Snowflake),
}

impl GatewayCall {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Grant(..) | Self::Revoke(..))
    }
}

#[derive(Default)]
struct FakeState {
    primary_guild: Option<Snowflake>,
    users: HashMap<Snowflake, PlatformUser>,
    members: Vec<GuildMember>,
    channel_guilds: HashMap<Snowflake, Snowflake>,
    fail_fetches: bool,
    fail_mutations: bool,
    guild_gone: bool,
    calls: Vec<GatewayCall>,
}

/// Platform gateway backed by in-memory state
#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    /// Gateway with no guild at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Gateway connected to [`GUILD_ID`], whose rules channel belongs to it
    pub fn with_guild() -> Self {
        let gateway = Self::default();
        {
            let mut state = gateway.state.lock();
            state.primary_guild = Some(GUILD_ID);
            state.channel_guilds.insert(RULES_CHANNEL_ID, GUILD_ID);
        }
        gateway
    }

    /// Add a member; its user becomes fetchable too
    pub fn add_member(&self, member: GuildMember) {
        let mut state = self.state.lock();
        state.users.insert(member.user_id(), member.user.clone());
        state.members.push(member);
    }

    pub fn add_members(&self, members: impl IntoIterator<Item = GuildMember>) {
        for member in members {
            self.add_member(member);
        }
    }

    /// Make every read fail with a platform error
    pub fn fail_fetches(&self) {
        self.state.lock().fail_fetches = true;
    }

    /// Answer member-list reads as if the guild no longer exists
    pub fn lose_guild(&self) {
        self.state.lock().guild_gone = true;
    }

    /// Make grant and revoke fail with a platform error
    pub fn fail_mutations(&self) {
        self.state.lock().fail_mutations = true;
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().calls.clone()
    }

    pub fn mutations(&self) -> Vec<GatewayCall> {
        self.calls().into_iter().filter(GatewayCall::is_mutation).collect()
    }

    pub fn count(&self, matcher: impl Fn(&GatewayCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| matcher(c)).count()
    }

    /// Current role set of a member
    pub fn roles_of(&self, user_id: Snowflake) -> Vec<Snowflake> {
        let state = self.state.lock();
        let mut roles: Vec<Snowflake> = state
            .members
            .iter()
            .find(|m| m.user_id() == user_id)
            .map(|m| m.role_ids.iter().copied().collect())
            .unwrap_or_default();
        roles.sort();
        roles
    }

    fn record(&self, call: GatewayCall) -> GatewayResult<()> {
        let mut state = self.state.lock();
        let failing = if call.is_mutation() {
            state.fail_mutations
        } else {
            state.fail_fetches
        };
        state.calls.push(call);
        if failing {
            return Err(DomainError::PlatformError("simulated outage".to_string()));
        }
        Ok(())
    }

    fn set_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
        held: bool,
    ) -> GatewayResult<()> {
        let mut state = self.state.lock();
        let member = state
            .members
            .iter_mut()
            .find(|m| m.guild_id == guild_id && m.user_id() == user_id)
            .ok_or(DomainError::MemberNotFound { guild_id, user_id })?;
        if held {
            member.role_ids.insert(role_id);
        } else {
            member.role_ids.remove(&role_id);
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformGateway for FakeGateway {
    fn primary_guild(&self) -> Option<Snowflake> {
        self.state.lock().primary_guild
    }

    async fn fetch_user(&self, user_id: Snowflake) -> GatewayResult<PlatformUser> {
        self.record(GatewayCall::FetchUser(user_id))?;
        self.state
            .lock()
            .users
            .get(&user_id)
            .cloned()
            .ok_or(DomainError::UserNotFound(user_id))
    }

    async fn fetch_channel_guild(&self, channel_id: Snowflake) -> GatewayResult<Option<Snowflake>> {
        self.record(GatewayCall::FetchChannelGuild(channel_id))?;
        Ok(self.state.lock().channel_guilds.get(&channel_id).copied())
    }

    async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> GatewayResult<GuildMember> {
        self.record(GatewayCall::FetchMember(guild_id, user_id))?;
        self.state
            .lock()
            .members
            .iter()
            .find(|m| m.guild_id == guild_id && m.user_id() == user_id)
            .cloned()
            .ok_or(DomainError::MemberNotFound { guild_id, user_id })
    }

    async fn fetch_members(&self, guild_id: Snowflake) -> GatewayResult<Vec<GuildMember>> {
        self.record(GatewayCall::FetchMembers(guild_id))?;
        let state = self.state.lock();
        if state.guild_gone {
            return Err(DomainError::GuildNotFound(guild_id));
        }
        Ok(state
            .members
            .iter()
            .filter(|m| m.guild_id == guild_id)
            .cloned()
            .collect())
    }

    async fn grant_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::Grant(guild_id, user_id, role_id))?;
        self.set_role(guild_id, user_id, role_id, true)
    }

    async fn revoke_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::Revoke(guild_id, user_id, role_id))?;
        self.set_role(guild_id, user_id, role_id, false)
    }
}

// ============================================================================
// Builders
// ============================================================================

pub fn user(id: u64, username: &str) -> PlatformUser {
    PlatformUser::new(Snowflake::new(id), username)
}

/// Fixed base instant for join dates
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Member of [`GUILD_ID`] who joined `days` after [`base_time`]
pub fn member(id: u64, username: &str, days: i64, roles: &[Snowflake]) -> GuildMember {
    GuildMember::new(GUILD_ID, user(id, username))
        .with_roles(roles.iter().copied())
        .joined(base_time() + Duration::days(days))
}

pub fn bot_member(id: u64, username: &str, days: i64) -> GuildMember {
    GuildMember::new(GUILD_ID, PlatformUser::bot(Snowflake::new(id), username))
        .joined(base_time() + Duration::days(days))
}

/// A fully resolved ✅ reaction on the rules message
pub fn rules_reaction(kind: ReactionKind, actor: PlatformUser) -> ReactionEvent {
    ReactionEvent {
        kind,
        channel_id: RULES_CHANNEL_ID,
        message_id: RULES_MESSAGE_ID,
        guild_id: Some(GUILD_ID),
        emoji: Emoji::Unicode(APPROVAL_EMOJI.to_string()),
        actor: Partial::Resolved(actor),
    }
}

/// Same reaction, but the platform only sent the user id
pub fn partial_rules_reaction(kind: ReactionKind, user_id: Snowflake) -> ReactionEvent {
    ReactionEvent {
        actor: Partial::Reference(user_id),
        ..rules_reaction(kind, PlatformUser::new(user_id, "unresolved"))
    }
}

pub fn settings(revoke_on_remove: bool) -> RoleSyncSettings {
    RoleSyncSettings {
        rules_channel_id: RULES_CHANNEL_ID,
        rules_message_id: RULES_MESSAGE_ID,
        viewer_role_id: VIEWER_ROLE_ID,
        sub_role_id: SUB_ROLE_ID,
        approval_emoji: APPROVAL_EMOJI.to_string(),
        revoke_on_remove,
    }
}

/// Configuration matching the fixture ids, bound to an ephemeral port
pub fn test_config() -> Result<AppConfig, ConfigError> {
    let rules_channel = RULES_CHANNEL_ID.to_string();
    let rules_message = RULES_MESSAGE_ID.to_string();
    let viewer_role = VIEWER_ROLE_ID.to_string();
    let sub_role = SUB_ROLE_ID.to_string();

    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP_ENV", "development"),
        ("DISCORD_TOKEN", "test-token"),
        ("RULE_CHANNEL_ID", rules_channel.as_str()),
        ("RULES_MESSAGE_ID", rules_message.as_str()),
        ("VIEWER_ROLE_ID", viewer_role.as_str()),
        ("SUB_ROLE_ID", sub_role.as_str()),
        ("API_SECRET", API_SECRET),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "0"),
        ("CORS_ALLOWED_METHODS", "GET,POST,DELETE"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).map(ToString::to_string))
}
