//! Platform user - the account behind a reaction or a membership

use crate::value_objects::Snowflake;

use super::partial::Resolvable;

/// A platform account as seen by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUser {
    pub id: Snowflake,
    pub username: String,
    pub global_name: Option<String>,
    pub bot: bool,
}

impl PlatformUser {
    /// Create a human (non-bot) user
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            global_name: None,
            bot: false,
        }
    }

    /// Create a bot account
    pub fn bot(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            bot: true,
            ..Self::new(id, username)
        }
    }

    /// Global display name, falling back to the username
    pub fn display_name(&self) -> &str {
        self.global_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.username)
    }
}

impl Resolvable for PlatformUser {
    type Key = Snowflake;

    fn key(&self) -> Snowflake {
        self.id
    }
}
