use crate::core::error::RunError;
use crate::shop::page::PageClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Canned documents keyed by URL. A URL with no entry renders as an empty
/// document, which is how a listing past its last page behaves.
pub struct SimPage {
    pages: HashMap<String, String>,
    current: Option<String>,
    stalled: bool,
}

impl SimPage {
    pub fn new(pages: HashMap<String, String>) -> Self {
        Self {
            pages,
            current: None,
            stalled: false,
        }
    }

    /// A page that never becomes ready, for exercising the load timeout.
    pub fn stalled() -> Self {
        Self {
            pages: HashMap::new(),
            current: None,
            stalled: true,
        }
    }
}

#[async_trait]
impl PageClient for SimPage {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.current = Some(self.pages.get(url).cloned().unwrap_or_default());
        Ok(())
    }

    async fn wait_ready(&mut self, poll: Duration, timeout: Duration) -> Result<()> {
        if !self.stalled {
            return Ok(());
        }
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() >= deadline {
                return Err(RunError::PageLoadTimeout(timeout).into());
            }
            sleep(poll).await;
        }
    }

    async fn document(&self) -> Result<String> {
        self.current.clone().context("no document loaded")
    }
}
