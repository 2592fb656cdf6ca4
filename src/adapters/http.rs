//! Direct fetch: one GET with consent-bypass cookies and a Chrome profile.

use crate::domain::model::{RawDocument, StrategyKind};
use crate::domain::ports::{ConfigProvider, FetchStrategy};
use crate::domain::query::Query;
use crate::utils::error::{FlightError, Result};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_PROVIDER_URL: &str = "https://www.google.com/travel/flights";

/// Chrome 126 on Windows.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// EU cookies that skip the data-collection consent form.
pub const CONSENT_COOKIES: [(&str, &str); 2] = [
    ("CONSENT", "PENDING+987"),
    ("SOCS", "CAESHAgBEhJnd3NfMjAyMzA4MTAtMF9SQzIaAmRlIAEaBgiAo_CmBg"),
];

const EXCERPT_CHARS: usize = 200;

pub fn consent_cookie_header() -> String {
    CONSENT_COOKIES
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn impersonation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Not/A)Brand\";v=\"8\", \"Chromium\";v=\"126\", \"Google Chrome\";v=\"126\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

#[derive(Debug, Clone)]
pub struct HttpStrategy {
    provider_url: String,
    user_agent: String,
    default_proxy: Option<String>,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl HttpStrategy {
    pub fn new(provider_url: impl Into<String>) -> Self {
        Self {
            provider_url: provider_url.into(),
            user_agent: CHROME_USER_AGENT.to_string(),
            default_proxy: None,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            provider_url: config.provider_url().to_string(),
            user_agent: config.user_agent().to_string(),
            default_proxy: config.proxy().map(str::to_string),
            timeout: config.request_timeout(),
            accept_invalid_certs: config.accept_invalid_certs(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // Built per call: the proxy can differ between calls.
    fn client(&self, proxy: Option<&str>) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(impersonation_headers())
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(proxy) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl FetchStrategy for HttpStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Direct
    }

    async fn fetch(&self, query: &Query, proxy: Option<&str>) -> Result<RawDocument> {
        let proxy = proxy.or(self.default_proxy.as_deref());
        let client = self.client(proxy)?;

        tracing::debug!(url = %self.provider_url, proxied = proxy.is_some(), "direct GET");
        let response = client
            .get(&self.provider_url)
            .query(&query.params())
            .header(header::COOKIE, consent_cookie_header())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if status != 200 {
            return Err(FlightError::FetchStatus {
                strategy: StrategyKind::Direct,
                status,
                excerpt: body.chars().take(EXCERPT_CHARS).collect(),
            });
        }

        Ok(RawDocument::new(StrategyKind::Direct, status, body))
    }
}
