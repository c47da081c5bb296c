//! Test server and HTTP helpers
//!
//! Each test spins up the full axum application on its own port against
//! the database named in `DATABASE_URL`. Responses are unwrapped through
//! the `{ statusCode, data, message, success }` envelope.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use vidstream_api::{create_app, create_app_state};
use vidstream_common::AppConfig;

use crate::fixtures::Envelope;

/// Ports are handed out sequentially so parallel tests never collide
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

fn next_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Load the application configuration for tests
///
/// Reads a `.env` file if present, then the process environment.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    AppConfig::from_env().context("Failed to load test configuration")
}

/// Whether the environment is set up for integration tests
///
/// Tests call this first and return early when the database is not
/// configured, so `cargo test` stays green on machines without one.
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    let ready =
        std::env::var("DATABASE_URL").is_ok() && std::env::var("JWT_SECRET").is_ok();
    if !ready {
        eprintln!("Skipping integration test: DATABASE_URL or JWT_SECRET not set");
    }
    ready
}

/// A running API server bound to a local port
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server with configuration from the environment
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a server with an explicit configuration
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config)
            .await
            .context("Failed to initialize application state")?;
        let app = create_app(state);

        let addr = SocketAddr::from(([127, 0, 0, 1], next_port()));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind test server to {addr}"))?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        // Give the accept loop a moment to come up
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// URL for a path under the versioned API prefix
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/api/v1{}", self.addr, path)
    }

    /// URL for a path outside the API prefix (health probes)
    pub fn root_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_root(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(self.root_url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// POST with no body, for toggles and logout
    pub async fn post_auth_empty(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn post_multipart_auth(
        &self,
        path: &str,
        token: &str,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn patch_auth<B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth_empty(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn patch_multipart_auth(
        &self,
        path: &str,
        token: &str,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

/// Assert the HTTP status and unwrap `data` out of a success envelope
pub async fn assert_data<T: DeserializeOwned>(
    response: reqwest::Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if status != expected_status {
        bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }

    let envelope: Envelope<T> =
        serde_json::from_str(&body).with_context(|| format!("Invalid envelope: {body}"))?;

    if !envelope.success {
        bail!("Expected success=true in envelope: {body}");
    }
    if envelope.status_code != expected_status.as_u16() {
        bail!(
            "Envelope statusCode {} does not match HTTP status {status}. Body: {body}",
            envelope.status_code
        );
    }

    envelope
        .data
        .with_context(|| format!("Expected data in success envelope: {body}"))
}

/// Assert a success envelope that carries no payload
///
/// Logout, password change and delete endpoints respond with `data: null`
/// inside a success envelope.
pub async fn assert_ok(response: reqwest::Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    let body = response.text().await?;

    if status != expected_status {
        bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }

    let envelope: Envelope<serde_json::Value> =
        serde_json::from_str(&body).with_context(|| format!("Invalid envelope: {body}"))?;

    if !envelope.success {
        bail!("Expected success=true in envelope: {body}");
    }
    Ok(())
}

/// Assert the HTTP status of a failure envelope and return its message
pub async fn assert_failure(
    response: reqwest::Response,
    expected_status: StatusCode,
) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if status != expected_status {
        bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }

    let envelope: Envelope<serde_json::Value> =
        serde_json::from_str(&body).with_context(|| format!("Invalid envelope: {body}"))?;

    if envelope.success {
        bail!("Expected success=false in envelope: {body}");
    }
    if envelope.data.is_some() {
        bail!("Expected null data in failure envelope: {body}");
    }
    if envelope.status_code != expected_status.as_u16() {
        bail!(
            "Envelope statusCode {} does not match HTTP status {status}. Body: {body}",
            envelope.status_code
        );
    }

    Ok(envelope.message)
}

/// Assert only the HTTP status, for responses outside the envelope
pub async fn assert_status(response: reqwest::Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await.unwrap_or_default();
        bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
