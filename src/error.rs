use rust_decimal::Decimal;

use crate::types::Side;

/// Result type for polymarket-orders operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for polymarket-orders
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or unknown static configuration (tick size, neg risk flag, chain id)
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller supplied a value the exchange would reject
    #[error("validation error: {0}")]
    Validation(String),

    /// Not enough resting liquidity to price a market order
    #[error("liquidity error: {0}")]
    Liquidity(#[from] LiquidityError),

    /// An amount that cannot be expressed in base units
    #[error("precision error: {0}")]
    Precision(String),

    /// Signing operation failed
    #[error("signing error: {0}")]
    Signing(String),

    /// Authentication required but not provided
    #[error("authentication required: {0}")]
    AuthRequired(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Reasons a market order cannot be priced from the book.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiquidityError {
    #[error("no {} orders available", book_name(.side))]
    EmptyBook { side: Side },

    /// Fill-or-kill order deeper than the whole book.
    #[error("no match: requested {requested}, book depth {available}")]
    NoMatch {
        requested: Decimal,
        available: Decimal,
    },
}

fn book_name(side: &Side) -> &'static str {
    match side {
        Side::Buy => "ask",
        Side::Sell => "bid",
    }
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn precision(msg: impl Into<String>) -> Self {
        Error::Precision(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_liquidity(&self) -> bool {
        matches!(self, Error::Liquidity(_))
    }
}

impl From<alloy_signer::Error> for Error {
    fn from(err: alloy_signer::Error) -> Self {
        Error::Signing(err.to_string())
    }
}
