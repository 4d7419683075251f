use crate::core::error::RunError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// A navigable page handle. The pipeline treats this as a black box that
/// renders a URL and hands back the document body as one string.
#[async_trait]
pub trait PageClient: Send + Sync {
    /// Point the page at a new URL and start loading it.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Poll until the current document is available. Fails with
    /// [`RunError::PageLoadTimeout`] once the deadline passes.
    async fn wait_ready(&mut self, poll: Duration, timeout: Duration) -> Result<()>;

    /// The full document body of the last loaded page.
    async fn document(&self) -> Result<String>;
}

/// Page handle backed by plain HTTP GETs over the shared client. The body is
/// held in full once the fetch completes, so readiness follows immediately
/// after a successful navigation.
pub struct HttpPage {
    client: Client,
    body: Option<String>,
}

impl HttpPage {
    pub fn new(client: Client) -> Self {
        Self { client, body: None }
    }
}

#[async_trait]
impl PageClient for HttpPage {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.body = None;
        let body = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("requesting page {url}"))?
            .error_for_status()
            .with_context(|| format!("non-success status for page {url}"))?
            .text()
            .await
            .with_context(|| format!("reading page body for {url}"))?;
        self.body = Some(body);
        Ok(())
    }

    async fn wait_ready(&mut self, poll: Duration, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while self.body.is_none() {
            if Instant::now() >= deadline {
                return Err(RunError::PageLoadTimeout(timeout).into());
            }
            sleep(poll).await;
        }
        Ok(())
    }

    async fn document(&self) -> Result<String> {
        self.body.clone().context("no document loaded")
    }
}
