//! Order construction: rounding, amounts, market pricing and assembly.

mod amounts;
mod builder;
mod price;
mod rounding;

pub use amounts::{get_market_order_amounts, get_order_amounts, OrderAmounts};
pub use builder::{is_tick_size_smaller, price_valid, OrderBuilder};
pub use price::{calculate_buy_market_price, calculate_market_price, calculate_sell_market_price};
pub use rounding::{
    decimal_places, fix_amount_rounding, round_down, round_normal, round_up, to_token_decimals,
};
pub use crate::types::RoundConfig;
