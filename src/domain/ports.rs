use crate::domain::model::{RawDocument, StrategyKind};
use crate::domain::query::{Query, SearchRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Where exported reports end up.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn provider_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn proxy(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    fn accept_invalid_certs(&self) -> bool;
    fn remote_browser_endpoint(&self) -> Option<&str>;
    fn chrome_executable(&self) -> Option<&str>;
    fn browser_timeout(&self) -> Duration;
}

/// Turns structured search input into the transport-ready `tfs` blob.
pub trait QueryEncoder: Send + Sync {
    fn encode(&self, request: &SearchRequest) -> Result<Vec<u8>>;
}

/// A single way of retrieving the provider page for a query.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Returns the page on success. Anything other than HTTP 200 is an error.
    async fn fetch(&self, query: &Query, proxy: Option<&str>) -> Result<RawDocument>;
}
