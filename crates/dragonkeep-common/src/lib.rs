//! # dragonkeep-common
//!
//! Shared utilities including configuration, error handling, API key checks, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{ApiSecret, API_KEY_HEADER};
pub use config::{
    AppConfig, AppSettings, ChannelConfig, ConfigError, CorsConfig, DatabaseConfig,
    DiscordConfig, Environment, RateLimitConfig, RoleSyncConfig, ServerConfig,
};
pub use error::{AppError, AppResult, ErrorResponse, SERVER_ERROR_MESSAGE};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
