//! Browser-rendered page fetching for sites that populate pricing
//! client-side.
//!
//! Drives a headless Chrome instance via chromiumoxide. The session is a
//! scoped resource: launch it, render pages through it, then release it
//! with [`BrowserSession::close`].

use crate::fetch::FetchError;
use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A running headless-browser session.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launches headless Chrome and starts its event loop.
    pub async fn launch() -> Result<Self> {
        debug!("Launching headless browser");

        let config = BrowserConfig::builder()
            .arg("--ignore-certificate-errors")
            .arg("--incognito")
            .build()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid browser configuration")?;

        let (browser, mut events) =
            Browser::launch(config).await.context("Failed to launch headless browser")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// Navigates to a URL, waits (bounded) until `wait_for` matches in the
    /// rendered DOM, and returns the page HTML.
    pub async fn rendered_html(
        &self,
        url: &str,
        wait_for: &str,
        timeout: Duration,
    ) -> Result<String> {
        debug!("Rendering {} (waiting for '{}')", url, wait_for);

        let page = self.browser.new_page(url).await.context("Failed to open page")?;

        // Initial navigation settles before we start polling the DOM;
        // failures here are non-fatal since the selector wait decides.
        if let Err(e) = page.wait_for_navigation().await {
            debug!("Navigation wait ended early: {}", e);
        }

        self.wait_for_selector(&page, wait_for, timeout).await?;

        let html = page.content().await.context("Failed to read rendered page")?;

        if let Err(e) = page.close().await {
            debug!("Page close failed: {}", e);
        }

        Ok(html)
    }

    async fn wait_for_selector(
        &self,
        page: &Page,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), FetchError> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if page.find_element(selector).await.is_ok() {
                return Ok(());
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(FetchError::RenderTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Shuts the browser down and stops its event loop.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {}", e);
        }

        if let Err(e) = self.browser.wait().await {
            debug!("Browser wait failed: {}", e);
        }

        self.handler.abort();
    }
}
