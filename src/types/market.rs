use alloy_primitives::hex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use super::{Side, TickSize};
use crate::error::Result;

/// One price level of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub price: Decimal,
    pub size: Decimal,
}

impl OrderSummary {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }
}

/// Order book snapshot as returned by `GET /book`
///
/// Both sides are ordered worst price first: bids ascend, asks descend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSummary {
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub bids: Vec<OrderSummary>,
    #[serde(default)]
    pub asks: Vec<OrderSummary>,
    #[serde(default)]
    pub hash: Option<String>,
}

impl OrderBookSummary {
    /// Levels a taker on `side` consumes: asks for buys, bids for sells.
    pub fn opposing_levels(&self, side: Side) -> &[OrderSummary] {
        match side {
            Side::Buy => &self.asks,
            Side::Sell => &self.bids,
        }
    }

    /// SHA-1 hex digest of the compact JSON snapshot with `hash` set to `""`.
    ///
    /// This is how the server fingerprints a book, so a snapshot can be checked
    /// before a market order is priced from it.
    pub fn compute_hash(&self) -> Result<String> {
        let unhashed = OrderBookSummary {
            hash: Some(String::new()),
            ..self.clone()
        };
        let json = serde_json::to_string(&unhashed)?;
        Ok(hex::encode(Sha1::digest(json.as_bytes())))
    }

    /// Whether the server-sent `hash` matches the snapshot's contents.
    pub fn verify_hash(&self) -> Result<bool> {
        match &self.hash {
            Some(hash) => Ok(self.compute_hash()?.eq_ignore_ascii_case(hash)),
            None => Ok(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickSizeResponse {
    pub minimum_tick_size: TickSize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NegRiskResponse {
    pub neg_risk: bool,
}
