//! Domain entities

mod member;
mod partial;
mod reaction;
mod revenue;
mod user;

pub use member::{GuildMember, MemberTier};
pub use partial::{Partial, Resolvable};
pub use reaction::{Emoji, ReactionEvent, ReactionKind};
pub use revenue::{Revenue, RevenueSource};
pub use user::PlatformUser;
