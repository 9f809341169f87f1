use serde::Serialize;

use super::ClobClient;
use crate::error::Result;
use crate::http::{create_l2_headers, HttpClient};
use crate::orders::OrderBuilder;
use crate::types::{
    ApiCreds, CancelOrdersResponse, MarketOrderArgs, OrderArgs, OrderId, OrderType,
    PartialCreateOrderOptions, PostOrder, PostOrderResponse, SignedOrder,
};

/// Client for trading operations
///
/// Builds orders against market parameters fetched through its [`ClobClient`],
/// then posts and cancels them with L2 (API key) authentication.
pub struct TradingClient {
    http_client: HttpClient,
    clob: ClobClient,
    api_creds: ApiCreds,
    order_builder: OrderBuilder,
}

impl TradingClient {
    /// Create a new TradingClient
    ///
    /// # Arguments
    /// * `host` - The base URL for the API
    /// * `api_creds` - API credentials of the builder's signer
    /// * `order_builder` - OrderBuilder instance for creating orders
    pub fn new(host: impl Into<String>, api_creds: ApiCreds, order_builder: OrderBuilder) -> Self {
        let host = host.into();
        Self {
            http_client: HttpClient::new(host.clone()),
            clob: ClobClient::new(host),
            api_creds,
            order_builder,
        }
    }

    pub fn clob(&self) -> &ClobClient {
        &self.clob
    }

    pub fn order_builder(&self) -> &OrderBuilder {
        &self.order_builder
    }

    /// Create a limit order (local signing, not posted)
    ///
    /// Tick size and neg risk not given in `options` are fetched for the token.
    pub async fn create_order(
        &self,
        order_args: &OrderArgs,
        options: PartialCreateOrderOptions,
    ) -> Result<SignedOrder> {
        let options = self
            .clob
            .resolve_order_options(&order_args.token_id, options)
            .await?;
        self.order_builder.create_order(order_args, options)
    }

    /// Create a market order (local signing, not posted)
    ///
    /// Without an explicit price the book is fetched and walked for one.
    pub async fn create_market_order(
        &self,
        order_args: &MarketOrderArgs,
        options: PartialCreateOrderOptions,
    ) -> Result<SignedOrder> {
        let options = self
            .clob
            .resolve_order_options(&order_args.token_id, options)
            .await?;
        if order_args.price.is_some() {
            return self.order_builder.create_market_order(order_args, options);
        }

        let book = self.clob.get_order_book(&order_args.token_id).await?;
        if book.hash.is_some() && !book.verify_hash()? {
            tracing::debug!(
                token_id = %order_args.token_id,
                "order book hash does not match its levels"
            );
        }
        self.order_builder
            .create_market_order_from_book(order_args, &book, options)
    }

    /// Post a signed order to the exchange
    pub async fn post_order(
        &self,
        order: SignedOrder,
        order_type: OrderType,
    ) -> Result<PostOrderResponse> {
        let owner = self.api_creds.api_key.clone();
        let post_order = PostOrder::new(order, owner, order_type);
        self.post_l2("/order", &post_order).await
    }

    /// Create and post a limit order in one step
    pub async fn create_and_post_order(
        &self,
        order_args: &OrderArgs,
        options: PartialCreateOrderOptions,
        order_type: OrderType,
    ) -> Result<PostOrderResponse> {
        let order = self.create_order(order_args, options).await?;
        self.post_order(order, order_type).await
    }

    /// Create and post a market order with its own order type (FOK unless set)
    pub async fn create_and_post_market_order(
        &self,
        order_args: &MarketOrderArgs,
        options: PartialCreateOrderOptions,
    ) -> Result<PostOrderResponse> {
        let order = self.create_market_order(order_args, options).await?;
        self.post_order(order, order_args.order_type).await
    }

    /// Cancel a specific order
    pub async fn cancel(&self, order_id: &OrderId) -> Result<CancelOrdersResponse> {
        let body = serde_json::json!({ "orderID": order_id.as_str() });
        self.delete_l2("/order", &body).await
    }

    /// Cancel multiple orders
    pub async fn cancel_orders(&self, order_ids: &[OrderId]) -> Result<CancelOrdersResponse> {
        let ids: Vec<&str> = order_ids.iter().map(|id| id.as_str()).collect();
        self.delete_l2("/orders", &ids).await
    }

    /// Cancel every open order of the API key's owner
    pub async fn cancel_all(&self) -> Result<CancelOrdersResponse> {
        self.delete_l2("/cancel-all", &serde_json::json!({})).await
    }

    async fn post_l2<B: Serialize + ?Sized, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let headers = create_l2_headers(
            self.order_builder.signer(),
            &self.api_creds,
            "POST",
            path,
            Some(body),
        )?;
        self.http_client.post(path, body, Some(headers)).await
    }

    async fn delete_l2<B: Serialize + ?Sized, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let headers = create_l2_headers(
            self.order_builder.signer(),
            &self.api_creds,
            "DELETE",
            path,
            Some(body),
        )?;
        self.http_client
            .delete_with_body(path, body, Some(headers))
            .await
    }
}
