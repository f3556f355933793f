use std::sync::Arc;

use log::warn;
use serde_json::Value;

use crate::auth::CredentialProvider;
use crate::config::{Market, Portfolios};
use crate::errors::CoreError;
use crate::models::quote::{BrapiQuote, BrapiResponse};
use crate::models::stock::StockRow;
use crate::providers::endpoints;
use crate::providers::traits::{HttpGateway, Pacer};
use crate::storage::cache::CacheStore;
use crate::transform;

/// What a refresh produced.
///
/// A missing credential is an outcome, not an error: the user may simply
/// have declined the prompt, so the caller keeps its current rows and
/// shows no error indicator.
#[derive(Debug)]
pub enum RefreshOutcome {
    Updated(Vec<StockRow>),
    NoCredentials,
}

/// The data-refresh pipeline: cache-or-fetch decision, token acquisition,
/// per-market fetch/transform, and cache write-back.
///
/// Cache contents differ per market. Brazil caches the raw API records
/// (one cheap batched call, transform on every read); the US path caches
/// already-transformed rows, because rebuilding them costs two rate-limited
/// calls per symbol.
pub struct RefreshService {
    gateway: Arc<dyn HttpGateway>,
    cache: CacheStore,
    credentials: Arc<dyn CredentialProvider>,
    pacer: Arc<dyn Pacer>,
    portfolios: Portfolios,
}

impl RefreshService {
    pub fn new(
        gateway: Arc<dyn HttpGateway>,
        cache: CacheStore,
        credentials: Arc<dyn CredentialProvider>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self::with_portfolios(gateway, cache, credentials, pacer, Portfolios::default())
    }

    /// Construct with explicit holdings tables (tests use small ones).
    pub fn with_portfolios(
        gateway: Arc<dyn HttpGateway>,
        cache: CacheStore,
        credentials: Arc<dyn CredentialProvider>,
        pacer: Arc<dyn Pacer>,
        portfolios: Portfolios,
    ) -> Self {
        Self {
            gateway,
            cache,
            credentials,
            pacer,
            portfolios,
        }
    }

    pub fn portfolios(&self) -> &Portfolios {
        &self.portfolios
    }

    /// Run the refresh pipeline for one market.
    ///
    /// On `Err` the caller's row list must stay untouched; the pipeline
    /// never returns partial Brazil results and never retries.
    pub async fn refresh(&self, market: Market) -> Result<RefreshOutcome, CoreError> {
        match market {
            Market::Brazil => self.refresh_brazil().await,
            Market::Us => self.refresh_us().await,
        }
    }

    /// Brazil path: one batched call, all-or-nothing.
    async fn refresh_brazil(&self) -> Result<RefreshOutcome, CoreError> {
        let config = Market::Brazil.config();
        let holdings = self.portfolios.for_market(Market::Brazil);

        if let Some(cached) = self.cache.get::<Vec<BrapiQuote>>(config) {
            let rows = cached.iter().map(|q| transform::brazil_row(q, holdings)).collect();
            return Ok(RefreshOutcome::Updated(rows));
        }

        let Some(token) = self.credentials.obtain(Market::Brazil) else {
            return Ok(RefreshOutcome::NoCredentials);
        };

        let tickers: Vec<&str> = holdings.iter().map(|h| h.ticker).collect();
        let url = endpoints::brazil_quote_url(config, &tickers.join(","), &token);

        let reply = self.gateway.get(&url).await?;
        if !reply.ok() {
            return Err(CoreError::Api {
                provider: "brapi.dev".into(),
                message: format!("HTTP error! status: {}", reply.status),
            });
        }

        let response: BrapiResponse = serde_json::from_str(&reply.body)?;
        let results = response
            .results
            .ok_or_else(|| CoreError::InvalidResponse("missing results field".into()))?;

        // Raw records go to cache pre-transform; the transform is cheap
        // and holdings may change between cache reads.
        self.cache.set(config, &results);

        let rows = results.iter().map(|q| transform::brazil_row(q, holdings)).collect();
        Ok(RefreshOutcome::Updated(rows))
    }

    /// US path: two rate-limited calls per symbol, sequential, with
    /// per-symbol skipping on quote failures.
    async fn refresh_us(&self) -> Result<RefreshOutcome, CoreError> {
        let config = Market::Us.config();
        let holdings = self.portfolios.for_market(Market::Us);

        if let Some(rows) = self.cache.get::<Vec<StockRow>>(config) {
            return Ok(RefreshOutcome::Updated(rows));
        }

        let Some(token) = self.credentials.obtain(Market::Us) else {
            return Ok(RefreshOutcome::NoCredentials);
        };

        if holdings.is_empty() {
            return Ok(RefreshOutcome::Updated(Vec::new()));
        }

        let mut rows = Vec::with_capacity(holdings.len());
        let last = holdings.len() - 1;

        for (i, holding) in holdings.iter().enumerate() {
            let symbol = holding.ticker;

            let quote_url = endpoints::us_quote_url(config, symbol, &token);
            let quote_reply = self.gateway.get(&quote_url).await?;
            if !quote_reply.ok() {
                // One bad symbol must not sink the whole refresh.
                warn!("HTTP error for {symbol}: status {}", quote_reply.status);
                continue;
            }
            let quote: Value = serde_json::from_str(&quote_reply.body)?;
            if let Some(api_error) = quote.get("error") {
                warn!("Error for {symbol}: {api_error}");
                continue;
            }

            // Fundamentals are optional enrichment; any failure here just
            // means zeroed ratios for this row.
            let metric_url = endpoints::us_metric_url(config, symbol, &token);
            let metric_reply = self.gateway.get(&metric_url).await?;
            let metrics: Option<Value> = if metric_reply.ok() {
                let value: Value = serde_json::from_str(&metric_reply.body)?;
                if value.get("error").is_some() {
                    None
                } else {
                    Some(value)
                }
            } else {
                None
            };

            if let Some(row) = transform::us_row(symbol, &quote, metrics.as_ref(), holdings) {
                rows.push(row);
            }

            if i < last {
                self.pacer.pace().await;
            }
        }

        // Transformed rows go to cache: the two-call shape is expensive to
        // redo and the TTL check covers staleness.
        self.cache.set(config, &rows);
        Ok(RefreshOutcome::Updated(rows))
    }
}
