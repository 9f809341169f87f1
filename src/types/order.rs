use alloy_primitives::{hex, Address};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::{OrderType, Side, TickSize, TokenId};
use crate::error::{Error, Result};

/// Limit order intent
#[derive(Debug, Clone, PartialEq)]
pub struct OrderArgs {
    /// Outcome token being traded
    pub token_id: TokenId,
    /// Limit price, within `[tick, 1 - tick]`
    pub price: Decimal,
    /// Size in outcome shares
    pub size: Decimal,
    pub side: Side,
    /// Fee charged to the maker on proceeds, in basis points
    pub fee_rate_bps: u32,
    /// Nonce used for on-chain cancellation
    pub nonce: u64,
    /// Unix seconds after which the order expires; 0 = never
    pub expiration: u64,
    /// Zero address for a public order
    pub taker: Address,
}

impl OrderArgs {
    pub fn new(token_id: impl Into<TokenId>, price: Decimal, size: Decimal, side: Side) -> Self {
        Self {
            token_id: token_id.into(),
            price,
            size,
            side,
            fee_rate_bps: 0,
            nonce: 0,
            expiration: 0,
            taker: Address::ZERO,
        }
    }

    #[must_use]
    pub fn fee_rate_bps(mut self, fee_rate_bps: u32) -> Self {
        self.fee_rate_bps = fee_rate_bps;
        self
    }

    #[must_use]
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    #[must_use]
    pub fn expiration(mut self, expiration: u64) -> Self {
        self.expiration = expiration;
        self
    }

    #[must_use]
    pub fn taker(mut self, taker: Address) -> Self {
        self.taker = taker;
        self
    }
}

/// Market order intent
///
/// `amount` is collateral (USDC) for buys and shares for sells. When `price` is
/// `None` it is discovered from the order book before signing.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketOrderArgs {
    pub token_id: TokenId,
    pub amount: Decimal,
    pub side: Side,
    pub price: Option<Decimal>,
    pub fee_rate_bps: u32,
    pub nonce: u64,
    pub taker: Address,
    pub order_type: OrderType,
}

impl MarketOrderArgs {
    pub fn new(token_id: impl Into<TokenId>, amount: Decimal, side: Side) -> Self {
        Self {
            token_id: token_id.into(),
            amount,
            side,
            price: None,
            fee_rate_bps: 0,
            nonce: 0,
            taker: Address::ZERO,
            order_type: OrderType::Fok,
        }
    }

    #[must_use]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn fee_rate_bps(mut self, fee_rate_bps: u32) -> Self {
        self.fee_rate_bps = fee_rate_bps;
        self
    }

    #[must_use]
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    #[must_use]
    pub fn taker(mut self, taker: Address) -> Self {
        self.taker = taker;
        self
    }

    #[must_use]
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }
}

/// Market parameters an order must be built against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOrderOptions {
    pub tick_size: TickSize,
    pub neg_risk: bool,
}

impl CreateOrderOptions {
    pub fn new(tick_size: TickSize, neg_risk: bool) -> Self {
        Self {
            tick_size,
            neg_risk,
        }
    }
}

/// Caller-supplied overrides; missing values are fetched from the CLOB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialCreateOrderOptions {
    pub tick_size: Option<TickSize>,
    pub neg_risk: Option<bool>,
}

impl PartialCreateOrderOptions {
    #[must_use]
    pub fn tick_size(mut self, tick_size: TickSize) -> Self {
        self.tick_size = Some(tick_size);
        self
    }

    #[must_use]
    pub fn neg_risk(mut self, neg_risk: bool) -> Self {
        self.neg_risk = Some(neg_risk);
        self
    }

    /// Requires both fields to be present; nothing is defaulted.
    pub fn resolve(self) -> Result<CreateOrderOptions> {
        let tick_size = self
            .tick_size
            .ok_or_else(|| Error::config("tick size must be resolved before building an order"))?;
        let neg_risk = self
            .neg_risk
            .ok_or_else(|| Error::config("neg risk flag must be resolved before building an order"))?;
        Ok(CreateOrderOptions::new(tick_size, neg_risk))
    }
}

impl From<CreateOrderOptions> for PartialCreateOrderOptions {
    fn from(options: CreateOrderOptions) -> Self {
        Self {
            tick_size: Some(options.tick_size),
            neg_risk: Some(options.neg_risk),
        }
    }
}

/// Canonical order payload, field for field what the exchange hashes.
///
/// Integer fields the exchange treats as `uint256` are carried as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub maker: Address,
    pub taker: Address,
    pub token_id: String,
    pub maker_amount: String,
    pub taker_amount: String,
    /// Exchange encoding: 0 = BUY, 1 = SELL
    pub side: u8,
    pub fee_rate_bps: String,
    pub nonce: String,
    pub signer: Address,
    pub expiration: String,
    /// 0 = EOA, 1 = proxy wallet, 2 = Gnosis Safe
    pub signature_type: u8,
}

/// An order plus its EIP-712 signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOrder {
    pub salt: u64,
    pub order: OrderData,
    /// 65 bytes, `r || s || v`
    pub signature: Vec<u8>,
}

impl SignedOrder {
    pub fn signature_hex(&self) -> String {
        hex::encode_prefixed(&self.signature)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedOrderWire<'a> {
    salt: u64,
    maker: &'a Address,
    signer: &'a Address,
    taker: &'a Address,
    token_id: &'a str,
    maker_amount: &'a str,
    taker_amount: &'a str,
    expiration: &'a str,
    nonce: &'a str,
    fee_rate_bps: &'a str,
    side: &'static str,
    signature_type: u8,
    signature: String,
}

impl Serialize for SignedOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let order = &self.order;
        let side = Side::try_from(order.side)
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .as_str();
        SignedOrderWire {
            salt: self.salt,
            maker: &order.maker,
            signer: &order.signer,
            taker: &order.taker,
            token_id: &order.token_id,
            maker_amount: &order.maker_amount,
            taker_amount: &order.taker_amount,
            expiration: &order.expiration,
            nonce: &order.nonce,
            fee_rate_bps: &order.fee_rate_bps,
            side,
            signature_type: order.signature_type,
            signature: self.signature_hex(),
        }
        .serialize(serializer)
    }
}

/// Body of `POST /order`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOrder {
    pub order: SignedOrder,
    pub owner: String,
    pub order_type: OrderType,
}

impl PostOrder {
    pub fn new(order: SignedOrder, owner: String, order_type: OrderType) -> Self {
        Self {
            order,
            owner,
            order_type,
        }
    }
}

/// Response of `POST /order`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOrderResponse {
    pub success: bool,
    #[serde(default)]
    pub error_msg: String,
    #[serde(rename = "orderID", default)]
    pub order_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transactions_hashes: Vec<String>,
}

/// Response of the cancel endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrdersResponse {
    #[serde(default)]
    pub canceled: Vec<String>,
    #[serde(default)]
    pub not_canceled: serde_json::Value,
}
