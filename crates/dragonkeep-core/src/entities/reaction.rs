//! Reaction events - an emoji added to or removed from a message

use crate::value_objects::Snowflake;

use super::partial::Partial;
use super::user::PlatformUser;

/// Direction of a reaction event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Add,
    Remove,
}

impl ReactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// Emoji used in a reaction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Emoji {
    /// Standard Unicode emoji, e.g. "✅"
    Unicode(String),
    /// Guild custom emoji
    Custom { id: Snowflake, name: Option<String> },
}

impl Emoji {
    /// Exact glyph comparison; custom emoji never match a Unicode glyph
    pub fn is_glyph(&self, glyph: &str) -> bool {
        matches!(self, Self::Unicode(s) if s == glyph)
    }

    /// Name used in logs
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unicode(s) => Some(s),
            Self::Custom { name, .. } => name.as_deref(),
        }
    }
}

/// Reaction notification from the platform
///
/// Transient: built once per gateway dispatch and consumed by the role-sync service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub kind: ReactionKind,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    /// Absent when the platform did not say which guild owns the channel
    pub guild_id: Option<Snowflake>,
    pub emoji: Emoji,
    pub actor: Partial<PlatformUser>,
}

impl ReactionEvent {
    /// Id of the reacting user, known even for partial payloads
    pub fn actor_id(&self) -> Snowflake {
        self.actor.key()
    }

    /// True if any part of the payload still needs a fetch
    pub fn is_partial(&self) -> bool {
        self.actor.is_partial() || self.guild_id.is_none()
    }
}
