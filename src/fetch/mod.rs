//! Page fetching: static HTTP GETs, browser-rendered fetches, and the
//! per-site dispatch between them.

pub mod http;

#[cfg(feature = "browser")]
pub mod browser;

use crate::config::Config;
use crate::sites::registry::{FetchStrategy, Site};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use http::HttpFetcher;

#[cfg(feature = "browser")]
pub use browser::BrowserSession;

/// Errors raised while retrieving a listing page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("timed out after {timeout:?} waiting for '{selector}' to render")]
    RenderTimeout { selector: String, timeout: Duration },

    #[error("'{site}' needs a browser-rendered fetch; rebuild with the `browser` feature")]
    BrowserUnavailable { site: String },

    #[error("failed to reach {url}")]
    Transport {
        url: String,
        #[source]
        source: wreq::Error,
    },
}

/// Source of listing-page content for a site - the seam commands are
/// tested through.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the fully rendered listing page for a site.
    async fn page(&self, site: Site) -> Result<String>;
}

/// Production page source: plain GETs for static sites, a headless
/// browser for scripted ones.
///
/// The browser session is launched at most once, before the first scripted
/// fetch, and must be released exactly once via [`SiteFetcher::shutdown`].
pub struct SiteFetcher {
    http: HttpFetcher,
    #[cfg(feature = "browser")]
    browser: tokio::sync::Mutex<Option<BrowserSession>>,
    #[cfg(feature = "browser")]
    render_timeout: Duration,
}

impl SiteFetcher {
    /// Creates a fetcher from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(config)?,
            #[cfg(feature = "browser")]
            browser: tokio::sync::Mutex::new(None),
            #[cfg(feature = "browser")]
            render_timeout: Duration::from_secs(config.render_timeout_secs),
        })
    }

    /// Releases the browser session, if one was launched.
    ///
    /// Callers run this on every exit path of a command, success or error.
    pub async fn shutdown(self) {
        #[cfg(feature = "browser")]
        if let Some(session) = self.browser.into_inner() {
            session.close().await;
        }
    }

    #[cfg(feature = "browser")]
    async fn rendered(&self, site: Site, wait_for: &str) -> Result<String> {
        let mut guard = self.browser.lock().await;
        if guard.is_none() {
            *guard = Some(BrowserSession::launch().await?);
        }

        match guard.as_ref() {
            Some(session) => session.rendered_html(site.url(), wait_for, self.render_timeout).await,
            None => anyhow::bail!("browser session unavailable"),
        }
    }

    #[cfg(not(feature = "browser"))]
    async fn rendered(&self, site: Site, _wait_for: &str) -> Result<String> {
        Err(FetchError::BrowserUnavailable { site: site.to_string() }.into())
    }
}

#[async_trait]
impl PageSource for SiteFetcher {
    async fn page(&self, site: Site) -> Result<String> {
        match site.fetch_strategy() {
            FetchStrategy::Static => Ok(self.http.get(site.url()).await?),
            FetchStrategy::Scripted { wait_for } => self.rendered(site, wait_for).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status { url: "https://example.com".into(), status: 503 };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("example.com"));

        let err = FetchError::RenderTimeout {
            selector: "ul.card__stats".into(),
            timeout: Duration::from_secs(10),
        };
        assert!(err.to_string().contains("ul.card__stats"));

        let err = FetchError::BrowserUnavailable { site: "Morris".into() };
        assert!(err.to_string().contains("Morris"));
        assert!(err.to_string().contains("browser"));
    }

    #[test]
    fn test_site_fetcher_construction() {
        let fetcher = SiteFetcher::new(&Config::default());
        assert!(fetcher.is_ok());
    }
}
