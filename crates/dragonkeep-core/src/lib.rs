//! # dragonkeep-core
//!
//! Domain layer: platform entities, value objects, and the ports (traits) through
//! which the services reach the community platform and the revenue ledger.
//! This crate has no dependency on the Discord client, the web framework or the database.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Emoji, GuildMember, MemberTier, Partial, PlatformUser, ReactionEvent, ReactionKind,
    Resolvable, Revenue, RevenueSource,
};
pub use error::DomainError;
pub use traits::{GatewayResult, PlatformGateway, RepoResult, RevenueRepository};
pub use value_objects::{Snowflake, SnowflakeParseError};
