//! Network clients for the CLOB.
//!
//! - [`ClobClient`]: public market parameters and books
//! - [`AuthenticatedClient`]: API key creation from the wallet key
//! - [`TradingClient`]: order creation, posting and cancellation

mod authenticated;
mod clob;
mod trading;

pub use authenticated::AuthenticatedClient;
pub use clob::ClobClient;
pub use trading::TradingClient;
