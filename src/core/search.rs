use crate::adapters::browser::{LocalBrowserStrategy, RemoteBrowserStrategy};
use crate::adapters::http::HttpStrategy;
use crate::core::classify::ResponseClassifier;
use crate::core::extract::{ExtractOptions, FlightExtractor};
use crate::core::fetch::{EscalationPlan, FetchOrchestrator};
use crate::domain::model::{FetchMode, RawDocument, SearchResult};
use crate::domain::ports::{ConfigProvider, FetchStrategy, QueryEncoder};
use crate::domain::query::{Query, SearchRequest};
use crate::utils::error::Result;
use std::sync::Arc;

/// Fetch → classify → extract, with escalation on failure.
pub struct FlightSearch {
    orchestrator: FetchOrchestrator,
    classifier: ResponseClassifier,
    extractor: FlightExtractor,
}

impl FlightSearch {
    pub fn new(strategies: Vec<Arc<dyn FetchStrategy>>) -> Result<Self> {
        Ok(Self {
            orchestrator: FetchOrchestrator::new(strategies),
            classifier: ResponseClassifier::new()?,
            extractor: FlightExtractor::new(ExtractOptions::default())?,
        })
    }

    /// Registers the direct strategy, the local browser and, when an
    /// endpoint is configured, the remote browser.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let direct: Arc<dyn FetchStrategy> = Arc::new(HttpStrategy::from_config(config));
        let local: Arc<dyn FetchStrategy> = Arc::new(LocalBrowserStrategy::from_config(config));
        let mut search = Self::new(vec![direct, local])?;
        match RemoteBrowserStrategy::from_config(config) {
            Some(remote) => search.orchestrator.register(Arc::new(remote)),
            None => tracing::debug!("no remote browser endpoint configured"),
        }
        Ok(search)
    }

    pub fn with_extract_options(mut self, options: ExtractOptions) -> Result<Self> {
        self.extractor = FlightExtractor::new(options)?;
        Ok(self)
    }

    pub fn parse(&self, raw: &RawDocument) -> Result<SearchResult> {
        let document = self.classifier.classify(&raw.body)?;
        self.extractor.extract(&document)
    }

    /// Entry point for callers holding structured search input.
    pub async fn get_flights<E: QueryEncoder + ?Sized>(
        &self,
        request: &SearchRequest,
        encoder: &E,
        mode: FetchMode,
        proxy: Option<&str>,
    ) -> Result<SearchResult> {
        let query = request.to_query(encoder)?;
        self.get_flights_from_query(&query, mode, proxy).await
    }

    pub async fn get_flights_from_query(
        &self,
        query: &Query,
        mode: FetchMode,
        proxy: Option<&str>,
    ) -> Result<SearchResult> {
        tracing::info!(%mode, "searching flights");

        let raw = self.orchestrator.fetch(query, mode, proxy).await?;

        let parse_error = match self.parse(&raw) {
            Ok(result) => {
                tracing::info!(
                    strategy = %raw.strategy,
                    flights = result.flights.len(),
                    "parsed results page"
                );
                return Ok(result);
            }
            Err(e) if e.is_parsing_failure() => e,
            Err(e) => return Err(e),
        };

        let Some(fallback) = EscalationPlan::for_mode(mode).parse_fallback() else {
            return Err(parse_error);
        };
        if !self.orchestrator.has_strategy(fallback) {
            tracing::debug!(fallback = %fallback, "parse fallback not registered");
            return Err(parse_error);
        }

        tracing::warn!(
            strategy = %raw.strategy,
            error = %parse_error,
            fallback = %fallback,
            "results page did not parse, escalating"
        );
        let raw = self.orchestrator.run_chain(&[fallback], query, proxy).await?;
        self.parse(&raw)
    }
}
