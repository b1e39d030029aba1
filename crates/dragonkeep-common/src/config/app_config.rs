//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::fmt;

use dragonkeep_core::Snowflake;

use crate::auth::ApiSecret;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub discord: DiscordConfig,
    pub role_sync: RoleSyncConfig,
    pub channels: ChannelConfig,
    pub api_secret: ApiSecret,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
    /// PostgreSQL ledger; the in-memory ledger is used when absent
    pub database: Option<DatabaseConfig>,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server bind configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Discord connection settings
#[derive(Clone)]
pub struct DiscordConfig {
    pub token: String,
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Rules-reaction role sync settings
#[derive(Debug, Clone)]
pub struct RoleSyncConfig {
    pub rules_channel_id: Snowflake,
    pub rules_message_id: Snowflake,
    pub viewer_role_id: Snowflake,
    pub sub_role_id: Snowflake,
    pub approval_emoji: String,
    pub revoke_on_remove: bool,
}

/// Channels the bot knows about but does not act on
#[derive(Debug, Clone, Default)]
pub struct ChannelConfig {
    pub welcome_channel_id: Option<Snowflake>,
    pub live_channel_id: Option<Snowflake>,
}

/// CORS configuration: one dashboard origin
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
    pub allowed_methods: Vec<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

// Default value functions
fn default_app_name() -> String {
    "dragonkeep".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3002
}

fn default_approval_emoji() -> String {
    "✅".to_string()
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (environment, map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| var(key).ok_or(ConfigError::MissingVar(key));
        // zero is never a valid platform id
        let snowflake = |key: &'static str, raw: String| match Snowflake::parse(&raw) {
            Ok(id) if !id.is_zero() => Ok(id),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        };

        let database = var("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_connections),
            min_connections: var("DATABASE_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_min_connections),
        });

        let revoke_on_remove = match var("ROLE_SYNC_REVOKE_ON_REMOVE") {
            None => false,
            Some(raw) => parse_bool(&raw)
                .ok_or(ConfigError::InvalidValue("ROLE_SYNC_REVOKE_ON_REMOVE", raw))?,
        };

        let port = match var("API_PORT") {
            None => default_port(),
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("API_PORT", raw))?,
        };

        let optional_snowflake = |key: &'static str| -> Result<Option<Snowflake>, ConfigError> {
            var(key).map(|raw| snowflake(key, raw)).transpose()
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port,
            },
            discord: DiscordConfig {
                token: var("DISCORD_TOKEN")
                    .or_else(|| var("TOKEN"))
                    .ok_or(ConfigError::MissingVar("DISCORD_TOKEN"))?,
            },
            role_sync: RoleSyncConfig {
                rules_channel_id: snowflake("RULE_CHANNEL_ID", required("RULE_CHANNEL_ID")?)?,
                rules_message_id: snowflake("RULES_MESSAGE_ID", required("RULES_MESSAGE_ID")?)?,
                viewer_role_id: snowflake("VIEWER_ROLE_ID", required("VIEWER_ROLE_ID")?)?,
                sub_role_id: snowflake("SUB_ROLE_ID", required("SUB_ROLE_ID")?)?,
                approval_emoji: var("ROLE_SYNC_EMOJI")
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(default_approval_emoji),
                revoke_on_remove,
            },
            channels: ChannelConfig {
                welcome_channel_id: optional_snowflake("WELCOME_CHANNEL_ID")?,
                live_channel_id: optional_snowflake("LIVE_CHANNEL_ID")?,
            },
            api_secret: ApiSecret::new(required("API_SECRET")?),
            cors: CorsConfig {
                allowed_origin: var("CORS_ALLOWED_ORIGIN").unwrap_or_else(default_cors_origin),
                allowed_methods: var("CORS_ALLOWED_METHODS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|m| !m.is_empty())
                            .map(str::to_uppercase)
                            .collect()
                    })
                    .unwrap_or_else(default_cors_methods),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: var("RATE_LIMIT_REQUESTS_PER_SECOND")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_requests_per_second),
                burst: var("RATE_LIMIT_BURST")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_burst),
            },
            database,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
