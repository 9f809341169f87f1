use rust_decimal::Decimal;

use crate::error::{Error, LiquidityError, Result};
use crate::types::{OrderSummary, OrderType, Side};

/// Limit price that lets a market order fill `amount_to_match` from `levels`.
///
/// `levels` must be ordered worst price first, as the book endpoint returns them,
/// so the walk from the back visits the best price first. Depth is counted in
/// collateral (`price * size`) when buying from asks and in shares when selling
/// into bids. The price of the level where the running depth reaches the target
/// is returned.
///
/// If the book is too thin, fill-or-kill orders fail with
/// [`LiquidityError::NoMatch`]; every other order type gets the worst listed price
/// (the first element) and fills what it can.
pub fn calculate_market_price(
    side: Side,
    levels: &[OrderSummary],
    amount_to_match: Decimal,
    order_type: OrderType,
) -> Result<Decimal> {
    let Some(first) = levels.first() else {
        return Err(LiquidityError::EmptyBook { side }.into());
    };

    let mut sum = Decimal::ZERO;
    for level in levels.iter().rev() {
        let depth = match side {
            Side::Buy => level.price.checked_mul(level.size),
            Side::Sell => Some(level.size),
        };
        sum = depth
            .and_then(|depth| sum.checked_add(depth))
            .ok_or_else(|| {
                Error::precision(format!("book depth overflows at price {}", level.price))
            })?;
        if sum >= amount_to_match {
            return Ok(level.price);
        }
    }

    if order_type == OrderType::Fok {
        return Err(LiquidityError::NoMatch {
            requested: amount_to_match,
            available: sum,
        }
        .into());
    }

    Ok(first.price)
}

/// [`calculate_market_price`] over asks, matching `amount_to_match` collateral.
pub fn calculate_buy_market_price(
    asks: &[OrderSummary],
    amount_to_match: Decimal,
    order_type: OrderType,
) -> Result<Decimal> {
    calculate_market_price(Side::Buy, asks, amount_to_match, order_type)
}

/// [`calculate_market_price`] over bids, matching `amount_to_match` shares.
pub fn calculate_sell_market_price(
    bids: &[OrderSummary],
    amount_to_match: Decimal,
    order_type: OrderType,
) -> Result<Decimal> {
    calculate_market_price(Side::Sell, bids, amount_to_match, order_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // worst (highest) ask first
    fn asks() -> Vec<OrderSummary> {
        vec![
            OrderSummary::new(dec!(0.60), dec!(100)),
            OrderSummary::new(dec!(0.55), dec!(100)),
            OrderSummary::new(dec!(0.50), dec!(100)),
        ]
    }

    // worst (lowest) bid first
    fn bids() -> Vec<OrderSummary> {
        vec![
            OrderSummary::new(dec!(0.40), dec!(100)),
            OrderSummary::new(dec!(0.45), dec!(100)),
            OrderSummary::new(dec!(0.48), dec!(100)),
        ]
    }

    #[test]
    fn test_buy_walks_from_best_ask() {
        let asks = asks();
        // best level holds 50 USDC
        assert_eq!(calculate_buy_market_price(&asks, dec!(50), OrderType::Fok).unwrap(), dec!(0.50));
        // 50 + 55 = 105 USDC through the second level
        assert_eq!(calculate_buy_market_price(&asks, dec!(80), OrderType::Fok).unwrap(), dec!(0.55));
        assert_eq!(calculate_buy_market_price(&asks, dec!(165), OrderType::Fok).unwrap(), dec!(0.60));
    }

    #[test]
    fn test_sell_counts_shares() {
        let bids = bids();
        assert_eq!(calculate_sell_market_price(&bids, dec!(100), OrderType::Fok).unwrap(), dec!(0.48));
        assert_eq!(calculate_sell_market_price(&bids, dec!(101), OrderType::Fok).unwrap(), dec!(0.45));
        assert_eq!(calculate_sell_market_price(&bids, dec!(300), OrderType::Fok).unwrap(), dec!(0.40));
    }

    #[test]
    fn test_empty_book_is_liquidity_error() {
        let err = calculate_buy_market_price(&[], dec!(10), OrderType::Gtc).unwrap_err();
        assert!(matches!(
            err,
            Error::Liquidity(LiquidityError::EmptyBook { side: Side::Buy })
        ));
        let err = calculate_sell_market_price(&[], dec!(10), OrderType::Fok).unwrap_err();
        assert!(err.is_liquidity());
    }

    #[test]
    fn test_fok_exhaustion_fails() {
        let err = calculate_buy_market_price(&asks(), dec!(1000), OrderType::Fok).unwrap_err();
        match err {
            Error::Liquidity(LiquidityError::NoMatch {
                requested,
                available,
            }) => {
                assert_eq!(requested, dec!(1000));
                assert_eq!(available, dec!(165));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_non_fok_exhaustion_takes_first_level() {
        for order_type in [OrderType::Gtc, OrderType::Gtd, OrderType::Fak] {
            assert_eq!(
                calculate_buy_market_price(&asks(), dec!(1000), order_type).unwrap(),
                dec!(0.60)
            );
            assert_eq!(
                calculate_sell_market_price(&bids(), dec!(1000), order_type).unwrap(),
                dec!(0.40)
            );
        }
    }

    #[test]
    fn test_deeper_fill_never_improves_price() {
        let asks = asks();
        let bids = bids();
        let mut last_buy = Decimal::ZERO;
        let mut last_sell = Decimal::MAX;
        for amount in 1..=165 {
            let amount = Decimal::from(amount);
            let buy = calculate_buy_market_price(&asks, amount, OrderType::Fok).unwrap();
            assert!(buy >= last_buy);
            last_buy = buy;
        }
        for amount in 1..=300 {
            let amount = Decimal::from(amount);
            let sell = calculate_sell_market_price(&bids, amount, OrderType::Fok).unwrap();
            assert!(sell <= last_sell);
            last_sell = sell;
        }
    }

    #[test]
    fn test_overflowing_depth_is_precision_error() {
        let half = Decimal::MAX / Decimal::TWO;
        let asks = vec![OrderSummary::new(Decimal::ONE, half); 3];
        let err = calculate_buy_market_price(&asks, Decimal::MAX, OrderType::Fok).unwrap_err();
        assert!(matches!(err, Error::Precision(_)));

        let bids = vec![OrderSummary::new(dec!(0.5), half); 3];
        let err = calculate_sell_market_price(&bids, Decimal::MAX, OrderType::Fak).unwrap_err();
        assert!(matches!(err, Error::Precision(_)));

        let asks = vec![OrderSummary::new(dec!(3), half)];
        let err = calculate_buy_market_price(&asks, dec!(1), OrderType::Fok).unwrap_err();
        assert!(matches!(err, Error::Precision(_)));
    }
}
