//! Test helpers for integration tests
//!
//! Spawns the HTTP API on an ephemeral port over a fake gateway and an
//! in-memory ledger, and wraps the requests the tests make.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dragonkeep_api::{create_app, create_app_state, serve};
use dragonkeep_common::{AppConfig, API_KEY_HEADER};
use dragonkeep_db::InMemoryRevenueRepository;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::fixtures::{test_config, FakeGateway, API_SECRET};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub gateway: Arc<FakeGateway>,
    shutdown: Option<oneshot::Sender<()>>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose gateway manages no guild
    pub async fn start() -> Result<Self> {
        Self::start_with_gateway(FakeGateway::empty()).await
    }

    /// Start a server over the given gateway
    pub async fn start_with_gateway(gateway: FakeGateway) -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config, gateway).await
    }

    pub async fn start_with_config(config: AppConfig, gateway: FakeGateway) -> Result<Self> {
        let gateway = Arc::new(gateway);
        let state = create_app_state(
            config,
            gateway.clone(),
            Arc::new(InMemoryRevenueRepository::new()),
        )?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async move {
                rx.await.ok();
            };
            serve(listener, app, shutdown).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            gateway,
            shutdown: Some(tx),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// GET without credentials
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// GET with an arbitrary key
    pub async fn get_with_key(&self, path: &str, key: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header(API_KEY_HEADER, key)
            .send()
            .await?)
    }

    /// GET with the configured key
    pub async fn get_auth(&self, path: &str) -> Result<Response> {
        self.get_with_key(path, API_SECRET).await
    }

    /// POST a JSON body with the configured key
    pub async fn post_auth<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(API_KEY_HEADER, API_SECRET)
            .json(body)
            .send()
            .await?)
    }

    /// POST a raw body with the configured key
    pub async fn post_raw_auth(&self, path: &str, body: &'static str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(API_KEY_HEADER, API_SECRET)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?)
    }

    /// DELETE with the configured key
    pub async fn delete_auth(&self, path: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .header(API_KEY_HEADER, API_SECRET)
            .send()
            .await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
