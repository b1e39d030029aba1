//! Server setup and initialization
//!
//! Builds the Axum application and serves it until a shutdown signal resolves.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use dragonkeep_common::{AppConfig, AppError, DatabaseConfig};
use dragonkeep_core::{PlatformGateway, RevenueRepository};
use dragonkeep_db::{create_pool, run_migrations, InMemoryRevenueRepository, PgRevenueRepository};
use dragonkeep_service::{RoleSyncSettings, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware_with_config;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router(state.clone());
    let router = apply_middleware_with_config(router, &config.rate_limit, &config.cors);
    router.with_state(state)
}

/// Wire the gateway and the ledger into the AppState
pub fn create_app_state(
    config: AppConfig,
    gateway: Arc<dyn PlatformGateway>,
    revenue_repo: Arc<dyn RevenueRepository>,
) -> Result<AppState, AppError> {
    let service_context = ServiceContextBuilder::new()
        .gateway(gateway)
        .revenue_repo(revenue_repo)
        .settings(RoleSyncSettings::from(&config.role_sync))
        .build()
        .map_err(AppError::from)?;

    Ok(AppState::new(service_context, config))
}

/// PostgreSQL ledger when configured, in-memory otherwise
pub async fn connect_ledger(
    database: Option<&DatabaseConfig>,
) -> Result<Arc<dyn RevenueRepository>, AppError> {
    let Some(database) = database else {
        warn!("DATABASE_URL not set; revenue ledger is in-memory and lost on restart");
        return Ok(Arc::new(InMemoryRevenueRepository::new()));
    };

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    Ok(Arc::new(PgRevenueRepository::new(pool)))
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Server error: {e}")))
}

/// Bind the configured address and run the HTTP server
pub async fn run_server<F>(app: Router, addr: &str, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);
    serve(listener, app, shutdown).await?;
    info!("HTTP server stopped");

    Ok(())
}
