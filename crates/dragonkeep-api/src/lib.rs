//! # dragonkeep-api
//!
//! REST API for the dashboard, built with Axum. Every `/api/*` route requires
//! the shared secret in the `x-api-key` header.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{connect_ledger, create_app, create_app_state, run_server, serve};
pub use state::AppState;
