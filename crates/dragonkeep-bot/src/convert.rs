//! serenity model -> domain entity mapping

use chrono::{DateTime, Utc};
use serenity::all::{Member, Reaction, ReactionType, Timestamp, User};
use serenity::Error as SerenityError;

use dragonkeep_core::{
    DomainError, Emoji, GuildMember, Partial, PlatformUser, ReactionEvent, ReactionKind, Snowflake,
};

pub fn user(user: &User) -> PlatformUser {
    PlatformUser {
        id: Snowflake::new(user.id.get()),
        username: user.name.clone(),
        global_name: user.global_name.clone(),
        bot: user.bot,
    }
}

pub fn member(member: &Member) -> GuildMember {
    let mut mapped = GuildMember::new(Snowflake::new(member.guild_id.get()), user(&member.user))
        .with_roles(member.roles.iter().map(|role| Snowflake::new(role.get())));
    mapped.nickname.clone_from(&member.nick);
    mapped.joined_at = member.joined_at.and_then(timestamp);
    mapped
}

pub fn timestamp(ts: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.unix_timestamp(), 0)
}

pub fn emoji(reaction_type: &ReactionType) -> Emoji {
    match reaction_type {
        ReactionType::Unicode(glyph) => Emoji::Unicode(glyph.clone()),
        ReactionType::Custom { id, name, .. } => Emoji::Custom {
            id: Snowflake::new(id.get()),
            name: name.clone(),
        },
        // unknown emoji kinds can never equal the approval glyph
        _ => Emoji::Custom {
            id: Snowflake::default(),
            name: None,
        },
    }
}

/// Build a domain event; None when the payload does not name the reacting user
pub fn reaction_event(kind: ReactionKind, reaction: &Reaction) -> Option<ReactionEvent> {
    let actor = match (&reaction.member, reaction.user_id) {
        (Some(member), _) => Partial::Resolved(user(&member.user)),
        (None, Some(user_id)) => Partial::Reference(Snowflake::new(user_id.get())),
        (None, None) => return None,
    };

    Some(ReactionEvent {
        kind,
        channel_id: Snowflake::new(reaction.channel_id.get()),
        message_id: Snowflake::new(reaction.message_id.get()),
        guild_id: reaction.guild_id.map(|id| Snowflake::new(id.get())),
        emoji: emoji(&reaction.emoji),
        actor,
    })
}

/// True if Discord answered 404 for the requested object
pub fn is_not_found(err: &SerenityError) -> bool {
    match err {
        SerenityError::Http(http_err) => http_err
            .status_code()
            .is_some_and(|status| status.as_u16() == 404),
        _ => false,
    }
}

/// Map a serenity failure, using `not_found` for a 404
pub fn platform_error(err: SerenityError, not_found: impl FnOnce() -> DomainError) -> DomainError {
    if is_not_found(&err) {
        not_found()
    } else {
        DomainError::PlatformError(err.to_string())
    }
}
