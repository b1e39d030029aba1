//! # dragonkeep-bot
//!
//! Discord side of the process: the serenity-backed [`SerenityGateway`] and the
//! event [`Handler`] that feeds reactions into the role sync service.

mod convert;
mod gateway;
mod handler;

pub use gateway::SerenityGateway;
pub use handler::Handler;

use serenity::all::GatewayIntents;

/// Guild metadata, member list, and reaction events
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
}
