//! Member entity - a user's membership in a guild as reported by the platform

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

use super::user::PlatformUser;

/// Guild member snapshot
///
/// Never authoritative: the platform owns membership, so a fresh snapshot is
/// fetched before any decision that depends on the member's roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub guild_id: Snowflake,
    pub user: PlatformUser,
    pub nickname: Option<String>,
    pub role_ids: HashSet<Snowflake>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl GuildMember {
    /// Create a member with no roles and an unknown join time
    pub fn new(guild_id: Snowflake, user: PlatformUser) -> Self {
        Self {
            guild_id,
            user,
            nickname: None,
            role_ids: HashSet::new(),
            joined_at: None,
        }
    }

    /// User id of the member
    #[inline]
    pub fn user_id(&self) -> Snowflake {
        self.user.id
    }

    /// Whether the account is a bot
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.user.bot
    }

    /// Guild nickname, then global name, then username
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.user.display_name())
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }

    /// Builder-style role assignment, used when mapping platform payloads
    pub fn with_roles(mut self, role_ids: impl IntoIterator<Item = Snowflake>) -> Self {
        self.role_ids.extend(role_ids);
        self
    }

    /// Builder-style join time
    pub fn joined(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = Some(joined_at);
        self
    }
}

/// Membership tier shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberTier {
    Sub,
    Viewer,
}

impl MemberTier {
    /// Sub role wins; every other member is labeled viewer, even without the viewer role
    pub fn classify(member: &GuildMember, sub_role_id: Snowflake) -> Self {
        if member.has_role(sub_role_id) {
            Self::Sub
        } else {
            Self::Viewer
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sub => "sub",
            Self::Viewer => "viewer",
        }
    }
}
