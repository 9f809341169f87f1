//! # polymarket-orders
//!
//! Order construction and signing for the Polymarket CLOB.
//!
//! The pipeline turns an order intent (token, side, price, size) into a signed
//! order the exchange accepts:
//! - [`orders`]: tick-size aware rounding, maker/taker amounts in 6-decimal base
//!   units and market-order pricing against the book
//! - [`signing`]: EIP-712 order signatures and API authentication
//! - [`safe`]: Gnosis Safe transaction approvals and Safe deployment signatures
//! - [`settlement`]: calldata for on-chain position management, routed through an
//!   EOA, a proxy wallet or a Safe
//! - [`client`]: thin async clients to fetch market parameters and post orders
//!
//! ## Example
//!
//! ```no_run
//! use polymarket_orders::{CreateOrderOptions, OrderArgs, OrderBuilder, Side, Signer, TickSize};
//! use rust_decimal_macros::dec;
//!
//! # fn main() -> polymarket_orders::Result<()> {
//! let signer = Signer::from_private_key("0x...", polymarket_orders::config::POLYGON)?;
//! let builder = OrderBuilder::new(signer, None, None);
//!
//! let args = OrderArgs::new("1234", dec!(0.56), dec!(10), Side::Buy);
//! let order = builder.create_order(&args, CreateOrderOptions::new(TickSize::Hundredth, false))?;
//! println!("{}", serde_json::to_string(&order)?);
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod client;
pub mod config;
pub mod error;
pub mod orders;
pub mod safe;
pub mod settlement;
pub mod signing;
pub mod types;

// Internal modules
mod http;

// Re-export commonly used types
pub use alloy_primitives::{Address, B256, U256};
pub use alloy_signer::k256;
pub use alloy_signer_local::PrivateKeySigner;
pub use error::{Error, LiquidityError, Result};
pub use types::{
    ApiCreds, CreateOrderOptions, MarketOrderArgs, OrderArgs, OrderBookSummary, OrderId,
    OrderSummary, OrderType, PartialCreateOrderOptions, Side, SignatureType, SignedOrder,
    TickSize, TokenId,
};

// Re-export clients
pub use client::{AuthenticatedClient, ClobClient, TradingClient};

// Re-export order builder
pub use orders::OrderBuilder;

// Re-export signer trait
pub use signing::{EthSigner, Signer};
