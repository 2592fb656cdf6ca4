use crate::domain::model::{FetchMode, RawDocument, StrategyKind};
use crate::domain::ports::FetchStrategy;
use crate::domain::query::Query;
use crate::utils::error::{FlightError, Result};
use std::sync::Arc;

/// Ordered strategies a mode may try, plus the one extra strategy tried
/// when the fetched page fails to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPlan {
    fetch_chain: Vec<StrategyKind>,
    on_parse_failure: Option<StrategyKind>,
}

impl EscalationPlan {
    pub fn for_mode(mode: FetchMode) -> Self {
        match mode {
            FetchMode::Direct => Self {
                fetch_chain: vec![StrategyKind::Direct],
                on_parse_failure: None,
            },
            FetchMode::DirectWithFallback => Self {
                fetch_chain: vec![StrategyKind::Direct, StrategyKind::RemoteBrowser],
                on_parse_failure: Some(StrategyKind::LocalBrowser),
            },
            FetchMode::ForceFallback => Self {
                fetch_chain: vec![StrategyKind::RemoteBrowser],
                on_parse_failure: None,
            },
            FetchMode::LocalBrowser => Self {
                fetch_chain: vec![StrategyKind::LocalBrowser],
                on_parse_failure: None,
            },
        }
    }

    pub fn fetch_chain(&self) -> &[StrategyKind] {
        &self.fetch_chain
    }

    pub fn parse_fallback(&self) -> Option<StrategyKind> {
        self.on_parse_failure
    }
}

/// Runs escalation chains over a set of registered strategies.
#[derive(Clone, Default)]
pub struct FetchOrchestrator {
    strategies: Vec<Arc<dyn FetchStrategy>>,
}

impl FetchOrchestrator {
    pub fn new(strategies: Vec<Arc<dyn FetchStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn register(&mut self, strategy: Arc<dyn FetchStrategy>) {
        self.strategies.retain(|s| s.kind() != strategy.kind());
        self.strategies.push(strategy);
    }

    pub fn has_strategy(&self, kind: StrategyKind) -> bool {
        self.strategies.iter().any(|s| s.kind() == kind)
    }

    fn strategy(&self, kind: StrategyKind) -> Option<&Arc<dyn FetchStrategy>> {
        self.strategies.iter().find(|s| s.kind() == kind)
    }

    pub async fn fetch(&self, query: &Query, mode: FetchMode, proxy: Option<&str>) -> Result<RawDocument> {
        let plan = EscalationPlan::for_mode(mode);
        self.run_chain(plan.fetch_chain(), query, proxy).await
    }

    /// Tries each registered strategy of `chain` in order. Unregistered steps
    /// are skipped. Only fetch failures escalate, and the last attempted
    /// strategy's failure is returned as-is.
    pub async fn run_chain(
        &self,
        chain: &[StrategyKind],
        query: &Query,
        proxy: Option<&str>,
    ) -> Result<RawDocument> {
        let Some(first) = chain.first() else {
            return Err(FlightError::ConfigValidationError {
                field: "fetch_chain".to_string(),
                message: "escalation chain is empty".to_string(),
            });
        };

        let available: Vec<&Arc<dyn FetchStrategy>> = chain
            .iter()
            .filter_map(|kind| {
                let strategy = self.strategy(*kind);
                if strategy.is_none() {
                    tracing::debug!(strategy = %kind, "strategy not registered, skipping");
                }
                strategy
            })
            .collect();

        if available.is_empty() {
            return Err(FlightError::StrategyUnavailable(*first));
        }

        for (position, strategy) in available.iter().enumerate() {
            let kind = strategy.kind();
            let is_last = position + 1 == available.len();

            tracing::debug!(strategy = %kind, "fetching results page");
            let attempt = strategy.fetch(query, proxy).await.and_then(|doc| {
                if doc.status == 200 {
                    Ok(doc)
                } else {
                    Err(FlightError::FetchStatus {
                        strategy: kind,
                        status: doc.status,
                        excerpt: String::new(),
                    })
                }
            });

            match attempt {
                Ok(doc) => {
                    tracing::debug!(strategy = %kind, bytes = doc.body.len(), "fetched results page");
                    return Ok(doc);
                }
                Err(e) if e.is_fetch_failure() && !is_last => {
                    tracing::warn!(strategy = %kind, error = %e, "fetch failed, escalating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(FlightError::StrategyUnavailable(*first))
    }
}
