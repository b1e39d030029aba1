//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ChannelConfig, ConfigError, CorsConfig, DatabaseConfig,
    DiscordConfig, Environment, RateLimitConfig, RoleSyncConfig, ServerConfig,
};
