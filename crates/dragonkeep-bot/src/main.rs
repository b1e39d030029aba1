//! dragonkeep entry point
//!
//! Runs the Discord client and the dashboard API in one process:
//! ```bash
//! cargo run -p dragonkeep-bot
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use std::sync::Arc;

use anyhow::Context as _;
use dragonkeep_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use dragonkeep_bot::{intents, Handler, SerenityGateway};
use dragonkeep_service::RoleSyncSettings;
use serenity::Client;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration comes first so APP_ENV can pick the log format
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = ?e, "dragonkeep stopped with an error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        revoke_on_remove = config.role_sync.revoke_on_remove,
        "Configuration loaded"
    );

    let revenue_repo = dragonkeep_api::connect_ledger(config.database.as_ref()).await?;

    let handler = Handler::new(
        RoleSyncSettings::from(&config.role_sync),
        revenue_repo.clone(),
    );
    let mut client = Client::builder(&config.discord.token, intents())
        .event_handler(handler)
        .await
        .context("Failed to build Discord client")?;

    let gateway = Arc::new(SerenityGateway::new(
        client.http.clone(),
        client.cache.clone(),
    ));
    let address = config.api.address();
    let state = dragonkeep_api::create_app_state(config, gateway, revenue_repo)?;
    let app = dragonkeep_api::create_app(state);

    // Flipped once on shutdown; the HTTP server waits on it to drain
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let http_shutdown = async move {
        let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
    };
    let mut api = tokio::spawn(async move {
        dragonkeep_api::run_server(app, &address, http_shutdown).await
    });

    let shard_manager = client.shard_manager.clone();
    let mut api_done = false;

    tokio::select! {
        result = client.start() => {
            result.context("Discord client stopped")?;
            info!("Discord client stopped");
        }
        result = &mut api => {
            api_done = true;
            result.context("HTTP server task panicked")??;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Shutdown requested");
        }
    }

    let _ = shutdown_tx.send(true);
    shard_manager.shutdown_all().await;
    if !api_done {
        api.await.context("HTTP server task panicked")??;
    }

    info!("dragonkeep stopped");
    Ok(())
}
