use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::orders::is_tick_size_smaller;
use crate::types::{
    CreateOrderOptions, NegRiskResponse, OrderBookSummary, PartialCreateOrderOptions, TickSize,
    TickSizeResponse, TokenId,
};

/// Client for the public CLOB market endpoints order construction depends on
///
/// Tick size and neg-risk answers are cached per token, since they are needed for
/// every order and rarely change.
pub struct ClobClient {
    http_client: HttpClient,
    tick_sizes: RwLock<HashMap<TokenId, TickSize>>,
    neg_risk: RwLock<HashMap<TokenId, bool>>,
}

impl ClobClient {
    /// Create a new ClobClient
    ///
    /// # Arguments
    /// * `host` - The base URL for the API (e.g., "https://clob.polymarket.com")
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(host),
            tick_sizes: RwLock::new(HashMap::new()),
            neg_risk: RwLock::new(HashMap::new()),
        }
    }

    pub fn host(&self) -> &str {
        self.http_client.host()
    }

    /// Get the order book for a token
    pub async fn get_order_book(&self, token_id: &TokenId) -> Result<OrderBookSummary> {
        let path = format!("/book?token_id={}", token_id.as_str());
        self.http_client.get(&path, None).await
    }

    /// Minimum tick size of the token's market, cached after the first query.
    pub async fn get_tick_size(&self, token_id: &TokenId) -> Result<TickSize> {
        if let Some(tick_size) = self.tick_sizes.read().await.get(token_id) {
            return Ok(*tick_size);
        }
        self.fetch_tick_size(token_id).await
    }

    /// Query the tick size, bypassing the cache, and store the answer.
    ///
    /// Markets tighten their tick size as the price nears 0 or 1.
    pub async fn fetch_tick_size(&self, token_id: &TokenId) -> Result<TickSize> {
        let path = format!("/tick-size?token_id={}", token_id.as_str());
        let response: TickSizeResponse = self.http_client.get(&path, None).await?;
        let tick_size = response.minimum_tick_size;

        let previous = self
            .tick_sizes
            .write()
            .await
            .insert(token_id.clone(), tick_size);
        if let Some(previous) = previous.filter(|p| *p != tick_size) {
            tracing::warn!(
                %token_id,
                %previous,
                current = %tick_size,
                "market tick size changed"
            );
        }
        Ok(tick_size)
    }

    /// Whether the token belongs to a negative-risk market, cached after the first query.
    pub async fn get_neg_risk(&self, token_id: &TokenId) -> Result<bool> {
        if let Some(neg_risk) = self.neg_risk.read().await.get(token_id) {
            return Ok(*neg_risk);
        }

        let path = format!("/neg-risk?token_id={}", token_id.as_str());
        let response: NegRiskResponse = self.http_client.get(&path, None).await?;
        self.neg_risk
            .write()
            .await
            .insert(token_id.clone(), response.neg_risk);
        Ok(response.neg_risk)
    }

    /// Seed the cache with values known out of band.
    pub async fn cache_market(&self, token_id: &TokenId, tick_size: TickSize, neg_risk: bool) {
        self.tick_sizes
            .write()
            .await
            .insert(token_id.clone(), tick_size);
        self.neg_risk.write().await.insert(token_id.clone(), neg_risk);
    }

    /// Complete `options` with the market's tick size and neg-risk flag.
    ///
    /// A caller-supplied tick size is kept unless it is finer than the market's
    /// minimum, which is an error.
    pub async fn resolve_order_options(
        &self,
        token_id: &TokenId,
        options: PartialCreateOrderOptions,
    ) -> Result<CreateOrderOptions> {
        let min_tick_size = self.get_tick_size(token_id).await?;
        let tick_size = check_tick_size(options.tick_size, min_tick_size)?;

        let neg_risk = match options.neg_risk {
            Some(neg_risk) => neg_risk,
            None => self.get_neg_risk(token_id).await?,
        };

        tracing::debug!(%token_id, %tick_size, neg_risk, "order options resolved");
        PartialCreateOrderOptions::default()
            .tick_size(tick_size)
            .neg_risk(neg_risk)
            .resolve()
    }
}

fn check_tick_size(requested: Option<TickSize>, minimum: TickSize) -> Result<TickSize> {
    match requested {
        Some(tick_size) if is_tick_size_smaller(tick_size, minimum) => Err(Error::validation(
            format!("invalid tick size ({tick_size}), minimum for the market is {minimum}"),
        )),
        Some(tick_size) => Ok(tick_size),
        None => Ok(minimum),
    }
}
