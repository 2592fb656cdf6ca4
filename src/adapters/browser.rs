//! Browser-driven fetches using chromiumoxide.
//!
//! The remote strategy attaches to an already running browser through its
//! DevTools endpoint; the local one launches a headless Chromium per call.
//! Both render the same provider URL and hand back the final DOM.

use crate::adapters::http::CONSENT_COOKIES;
use crate::domain::model::{RawDocument, StrategyKind};
use crate::domain::ports::{ConfigProvider, FetchStrategy};
use crate::domain::query::Query;
use crate::utils::error::{FlightError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::handler::Handler;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

pub const CHROMIUM_PATH_ENV: &str = "FLIGHT_SCRAPE_CHROMIUM_PATH";

/// Locate a Chromium binary: env override, configured path, then `PATH`.
pub fn find_chromium(configured: Option<&str>) -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CHROMIUM_PATH_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    if let Some(p) = configured {
        let path = PathBuf::from(p);
        if path.exists() {
            return Some(path);
        }
    }

    ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"]
        .iter()
        .find_map(|name| which::which(name).ok())
}

fn browser_error(strategy: StrategyKind, message: impl std::fmt::Display) -> FlightError {
    FlightError::Browser {
        strategy,
        message: message.to_string(),
    }
}

/// Full provider URL for a query.
pub fn page_url(provider_url: &str, query: &Query) -> Result<Url> {
    Url::parse_with_params(provider_url, query.params()).map_err(|e| {
        FlightError::InvalidConfigValueError {
            field: "provider_url".to_string(),
            value: provider_url.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Drains browser events until the connection goes away.
fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    })
}

/// Opens a tab, sets the consent cookies, renders `url` and returns its HTML.
async fn render_page(
    browser: &Browser,
    strategy: StrategyKind,
    url: &Url,
    timeout: Duration,
) -> Result<String> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| browser_error(strategy, format!("failed to open tab: {e}")))?;

    let mut cookies = Vec::with_capacity(CONSENT_COOKIES.len());
    for (name, value) in CONSENT_COOKIES {
        let cookie = CookieParam::builder()
            .name(name)
            .value(value)
            .url(url.as_str())
            .build()
            .map_err(|e| browser_error(strategy, format!("invalid cookie {name}: {e}")))?;
        cookies.push(cookie);
    }

    let loaded = tokio::time::timeout(timeout, async {
        page.set_cookies(cookies).await?;
        page.goto(url.as_str()).await?;
        page.wait_for_navigation().await?;
        page.content().await
    })
    .await;

    let _ = page.close().await;

    match loaded {
        Ok(Ok(html)) => Ok(html),
        Ok(Err(e)) => Err(browser_error(strategy, format!("navigation failed: {e}"))),
        Err(_) => Err(browser_error(
            strategy,
            format!("page load timed out after {}s", timeout.as_secs()),
        )),
    }
}

/// Attaches to a remote browser (`ws://…` DevTools URL or `http://host:port`).
#[derive(Debug, Clone)]
pub struct RemoteBrowserStrategy {
    endpoint: String,
    provider_url: String,
    timeout: Duration,
}

impl RemoteBrowserStrategy {
    pub fn new(endpoint: impl Into<String>, provider_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            provider_url: provider_url.into(),
            timeout,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Option<Self> {
        config.remote_browser_endpoint().map(|endpoint| {
            Self::new(endpoint, config.provider_url(), config.browser_timeout())
        })
    }
}

#[async_trait]
impl FetchStrategy for RemoteBrowserStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RemoteBrowser
    }

    async fn fetch(&self, query: &Query, proxy: Option<&str>) -> Result<RawDocument> {
        let kind = self.kind();
        if proxy.is_some() {
            tracing::debug!("proxy is ignored by the remote browser");
        }
        let url = page_url(&self.provider_url, query)?;

        tracing::debug!(endpoint = %self.endpoint, "connecting to remote browser");
        let (browser, handler) = Browser::connect(self.endpoint.as_str())
            .await
            .map_err(|e| browser_error(kind, format!("cannot connect to {}: {e}", self.endpoint)))?;
        let events = spawn_handler(handler);

        // The remote browser outlives this call; only our tab is closed.
        let html = render_page(&browser, kind, &url, self.timeout).await;
        events.abort();

        // chromiumoxide does not expose the document status.
        Ok(RawDocument::new(kind, 200, html?))
    }
}

/// Launches a local headless Chromium for each fetch.
#[derive(Debug, Clone)]
pub struct LocalBrowserStrategy {
    provider_url: String,
    chrome_executable: Option<String>,
    timeout: Duration,
}

impl LocalBrowserStrategy {
    pub fn new(provider_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider_url: provider_url.into(),
            chrome_executable: None,
            timeout,
        }
    }

    pub fn with_chrome_executable(mut self, path: impl Into<String>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            provider_url: config.provider_url().to_string(),
            chrome_executable: config.chrome_executable().map(str::to_string),
            timeout: config.browser_timeout(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .headless_mode(HeadlessMode::New)
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking");

        match find_chromium(self.chrome_executable.as_deref()) {
            Some(path) => builder = builder.chrome_executable(path),
            None => tracing::debug!("no Chromium found on PATH, using chromiumoxide detection"),
        }

        builder
            .build()
            .map_err(|e| browser_error(StrategyKind::LocalBrowser, format!("bad browser config: {e}")))
    }
}

#[async_trait]
impl FetchStrategy for LocalBrowserStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LocalBrowser
    }

    async fn fetch(&self, query: &Query, proxy: Option<&str>) -> Result<RawDocument> {
        let kind = self.kind();
        if proxy.is_some() {
            tracing::debug!("proxy is ignored by the local browser");
        }
        let url = page_url(&self.provider_url, query)?;

        let (mut browser, handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(|e| browser_error(kind, format!("failed to launch Chromium: {e}")))?;
        let events = spawn_handler(handler);

        let html = render_page(&browser, kind, &url, self.timeout).await;

        if let Err(e) = browser.close().await {
            tracing::debug!(error = %e, "browser close failed");
        }
        if let Err(e) = browser.wait().await {
            tracing::debug!(error = %e, "waiting for browser exit failed");
        }
        events.abort();

        Ok(RawDocument::new(kind, 200, html?))
    }
}
