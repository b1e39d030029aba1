//! Ports implemented by the infrastructure crates

mod gateway;
mod repositories;

pub use gateway::{GatewayResult, PlatformGateway};
pub use repositories::{RepoResult, RevenueRepository};
