use rust_decimal::Decimal;

use super::rounding::{fix_amount_rounding, round_down, round_normal, to_token_decimals};
use crate::error::{Error, Result};
use crate::types::{RoundConfig, Side};

/// Maker and taker legs of an order in 6-decimal base units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAmounts {
    pub side: Side,
    pub maker_amount: u64,
    pub taker_amount: u64,
}

impl OrderAmounts {
    /// Side in the exchange's numeric encoding
    pub fn exchange_side(&self) -> u8 {
        self.side.exchange_code()
    }
}

/// Amounts for a limit order of `size` shares at `price`.
///
/// A buy makes `size * price` collateral and takes `size` shares; a sell makes
/// `size` shares and takes `size * price` collateral.
pub fn get_order_amounts(
    side: Side,
    size: Decimal,
    price: Decimal,
    round_config: &RoundConfig,
) -> Result<OrderAmounts> {
    let raw_price = round_normal(price, round_config.price);
    let shares = positive(round_down(size, round_config.size), "size")?;
    let collateral = fix_amount_rounding(checked_mul(shares, raw_price)?, round_config);

    let (raw_maker_amt, raw_taker_amt) = match side {
        Side::Buy => (collateral, shares),
        Side::Sell => (shares, collateral),
    };

    Ok(OrderAmounts {
        side,
        maker_amount: to_token_decimals(raw_maker_amt)?,
        taker_amount: to_token_decimals(raw_taker_amt)?,
    })
}

/// Amounts for a market order.
///
/// For a buy `amount` is the collateral spent and the shares received are
/// `amount / price`; for a sell `amount` is the shares sold and the collateral
/// received is `amount * price`.
pub fn get_market_order_amounts(
    side: Side,
    amount: Decimal,
    price: Decimal,
    round_config: &RoundConfig,
) -> Result<OrderAmounts> {
    let raw_price = positive(round_normal(price, round_config.price), "price")?;
    let raw_maker_amt = positive(round_down(amount, round_config.size), "amount")?;

    let raw_taker_amt = match side {
        Side::Buy => raw_maker_amt
            .checked_div(raw_price)
            .ok_or_else(|| Error::precision(format!("{raw_maker_amt} / {raw_price} overflows")))?,
        Side::Sell => checked_mul(raw_maker_amt, raw_price)?,
    };
    let raw_taker_amt = fix_amount_rounding(raw_taker_amt, round_config);

    Ok(OrderAmounts {
        side,
        maker_amount: to_token_decimals(raw_maker_amt)?,
        taker_amount: to_token_decimals(raw_taker_amt)?,
    })
}

fn positive(value: Decimal, what: &str) -> Result<Decimal> {
    if value <= Decimal::ZERO {
        return Err(Error::validation(format!(
            "{what} must be positive after rounding, got {value}"
        )));
    }
    Ok(value)
}

fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| Error::precision(format!("{a} * {b} overflows")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::rounding::decimal_places;
    use crate::types::TickSize;
    use rust_decimal_macros::dec;

    const CFG_001: RoundConfig = TickSize::Hundredth.round_config();

    fn units_to_decimal(units: u64) -> Decimal {
        Decimal::from(units) / Decimal::from(1_000_000u64)
    }

    #[test]
    fn test_buy_rounds_price_half_up() {
        let amounts = get_order_amounts(Side::Buy, dec!(10.0), dec!(0.555), &CFG_001).unwrap();
        assert_eq!(amounts.side, Side::Buy);
        assert_eq!(amounts.exchange_side(), 0);
        assert_eq!(amounts.maker_amount, 5_600_000);
        assert_eq!(amounts.taker_amount, 10_000_000);
    }

    #[test]
    fn test_sell_swaps_roles() {
        let amounts = get_order_amounts(Side::Sell, dec!(10.0), dec!(0.555), &CFG_001).unwrap();
        assert_eq!(amounts.exchange_side(), 1);
        assert_eq!(amounts.maker_amount, 10_000_000);
        assert_eq!(amounts.taker_amount, 5_600_000);
    }

    #[test]
    fn test_size_is_truncated() {
        let amounts = get_order_amounts(Side::Buy, dec!(21.049), dec!(0.47), &CFG_001).unwrap();
        // 21.04 shares at 0.47 = 9.8888
        assert_eq!(amounts.taker_amount, 21_040_000);
        assert_eq!(amounts.maker_amount, 9_888_800);
    }

    #[test]
    fn test_fine_tick_keeps_six_places() {
        let cfg = TickSize::TenThousandth.round_config();
        let amounts = get_order_amounts(Side::Buy, dec!(33.33), dec!(0.1234), &cfg).unwrap();
        // 33.33 * 0.1234 = 4.112922
        assert_eq!(amounts.maker_amount, 4_112_922);
        assert_eq!(amounts.taker_amount, 33_330_000);
    }

    #[test]
    fn test_buy_sell_symmetry() {
        for tick in TickSize::ALL {
            let cfg = tick.round_config();
            for (size, price) in [
                (dec!(10), dec!(0.5)),
                (dec!(7.777), dec!(0.333)),
                (dec!(1234.56), dec!(0.0789)),
                (dec!(0.01), dec!(0.9)),
            ] {
                let buy = get_order_amounts(Side::Buy, size, price, &cfg).unwrap();
                let sell = get_order_amounts(Side::Sell, size, price, &cfg).unwrap();
                assert_eq!(buy.taker_amount, sell.maker_amount);
                assert_eq!(buy.maker_amount, sell.taker_amount);
            }
        }
    }

    #[test]
    fn test_amounts_respect_precision_bound() {
        let sizes = [dec!(1), dec!(3.33), dec!(17.89), dec!(250.01), dec!(99999.99)];
        let prices = [dec!(0.1), dec!(0.37), dec!(0.123), dec!(0.9876), dec!(0.5555)];
        for tick in TickSize::ALL {
            let cfg = tick.round_config();
            for size in sizes {
                for price in prices {
                    for side in [Side::Buy, Side::Sell] {
                        let limit = get_order_amounts(side, size, price, &cfg).unwrap();
                        let market = get_market_order_amounts(side, size, price, &cfg).unwrap();
                        for units in [
                            limit.maker_amount,
                            limit.taker_amount,
                            market.maker_amount,
                            market.taker_amount,
                        ] {
                            assert!(
                                decimal_places(units_to_decimal(units)) <= cfg.amount,
                                "{side} {size} @ {price} tick {tick}: {units}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_market_buy_divides_by_price() {
        let amounts = get_market_order_amounts(Side::Buy, dec!(100), dec!(0.3), &CFG_001).unwrap();
        // 100 / 0.3 = 333.333... -> 333.3333
        assert_eq!(amounts.maker_amount, 100_000_000);
        assert_eq!(amounts.taker_amount, 333_333_300);
    }

    #[test]
    fn test_market_sell_multiplies_by_price() {
        let amounts =
            get_market_order_amounts(Side::Sell, dec!(50.129), dec!(0.456), &CFG_001).unwrap();
        // 50.12 shares at 0.46 = 23.0552
        assert_eq!(amounts.maker_amount, 50_120_000);
        assert_eq!(amounts.taker_amount, 23_055_200);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let err = get_order_amounts(Side::Buy, dec!(0.004), dec!(0.5), &CFG_001).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_market_zero_price_is_rejected() {
        let err = get_market_order_amounts(Side::Buy, dec!(10), dec!(0.001), &CFG_001).unwrap_err();
        assert!(err.is_validation());
    }
}
