//! Exact decimal rounding for order amounts.
//!
//! Everything here is computed on `rust_decimal::Decimal`. The signed order is
//! verified on-chain, so an amount that is off by one base unit is an invalid order.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy::{MidpointAwayFromZero, ToNegativeInfinity, ToPositiveInfinity};

use crate::config::TOKEN_DECIMALS;
use crate::error::{Error, Result};
use crate::types::RoundConfig;

/// Largest multiple of `10^-digits` that is `<= x`.
pub fn round_down(x: Decimal, digits: u32) -> Decimal {
    x.round_dp_with_strategy(digits, ToNegativeInfinity)
}

/// Smallest multiple of `10^-digits` that is `>= x`.
pub fn round_up(x: Decimal, digits: u32) -> Decimal {
    x.round_dp_with_strategy(digits, ToPositiveInfinity)
}

/// Nearest multiple of `10^-digits`, ties away from zero.
pub fn round_normal(x: Decimal, digits: u32) -> Decimal {
    x.round_dp_with_strategy(digits, MidpointAwayFromZero)
}

/// Count of significant fractional digits (trailing zeros do not count).
pub fn decimal_places(x: Decimal) -> u32 {
    x.normalize().scale()
}

/// Convert a human amount to 6-decimal base units, rounding half-up.
pub fn to_token_decimals(x: Decimal) -> Result<u64> {
    let scaled = x
        .checked_mul(Decimal::from(10u64.pow(TOKEN_DECIMALS)))
        .ok_or_else(|| Error::precision(format!("amount {x} overflows base units")))?;
    round_normal(scaled, 0)
        .to_u64()
        .ok_or_else(|| Error::precision(format!("amount {x} is not representable as u64 base units")))
}

/// Bring a derived amount back within `amount` decimal places.
///
/// Rounds up at `amount + 4` first so the counter-amount is not shaved; if digits
/// beyond `amount` survive, truncates to exactly `amount`.
pub fn fix_amount_rounding(mut amt: Decimal, round_config: &RoundConfig) -> Decimal {
    if decimal_places(amt) > round_config.amount {
        amt = round_up(amt, round_config.amount + 4);
        if decimal_places(amt) > round_config.amount {
            amt = round_down(amt, round_config.amount);
        }
    }
    amt
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn samples() -> Vec<Decimal> {
        vec![
            dec!(0),
            dec!(1),
            dec!(0.5),
            dec!(0.555),
            dec!(0.125),
            dec!(5.60),
            dec!(10.129999),
            dec!(3.14159265358979),
            dec!(0.0001),
            dec!(123456.7890123),
            dec!(-2.345),
        ]
    }

    #[test]
    fn test_basic_rounding() {
        assert_eq!(round_down(dec!(10.129), 2), dec!(10.12));
        assert_eq!(round_up(dec!(10.121), 2), dec!(10.13));
        assert_eq!(round_normal(dec!(0.555), 2), dec!(0.56));
        assert_eq!(round_normal(dec!(0.554), 2), dec!(0.55));
        assert_eq!(round_normal(dec!(0.125), 2), dec!(0.13));
        assert_eq!(round_down(dec!(-2.345), 2), dec!(-2.35));
        assert_eq!(round_up(dec!(-2.345), 2), dec!(-2.34));
        assert_eq!(round_normal(dec!(-2.345), 2), dec!(-2.35));
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for x in samples() {
            for d in 0..8 {
                assert_eq!(round_down(round_down(x, d), d), round_down(x, d));
                assert_eq!(round_up(round_up(x, d), d), round_up(x, d));
                assert_eq!(round_normal(round_normal(x, d), d), round_normal(x, d));
            }
        }
    }

    #[test]
    fn test_rounding_brackets_value() {
        for x in samples() {
            for d in 0..8 {
                assert!(round_down(x, d) <= x, "{x} at {d}");
                assert!(x <= round_up(x, d), "{x} at {d}");
            }
        }
    }

    #[test]
    fn test_decimal_places_ignores_trailing_zeros() {
        assert_eq!(decimal_places(dec!(5.6000)), 1);
        assert_eq!(decimal_places(dec!(10.00)), 0);
        assert_eq!(decimal_places(dec!(0.0001)), 4);
        assert_eq!(decimal_places(dec!(3.14159)), 5);
    }

    #[test]
    fn test_decimal_to_token() {
        assert_eq!(to_token_decimals(dec!(1.5)).unwrap(), 1_500_000);
        assert_eq!(to_token_decimals(dec!(5.60)).unwrap(), 5_600_000);
        assert_eq!(to_token_decimals(dec!(0.0000005)).unwrap(), 1);
        assert_eq!(to_token_decimals(dec!(0.0000004)).unwrap(), 0);
    }

    #[test]
    fn test_token_decimals_rejects_negative() {
        let err = to_token_decimals(dec!(-1)).unwrap_err();
        assert!(matches!(err, Error::Precision(_)));
    }

    #[test]
    fn test_base_unit_round_trip() {
        for x in [dec!(0.1), dec!(5.6), dec!(10.123456), dec!(999.000001), dec!(0.5555555)] {
            let units = to_token_decimals(x).unwrap();
            let back = Decimal::from(units) / Decimal::from(1_000_000u64);
            assert_eq!(back, round_normal(x, 6));
        }
    }

    #[test]
    fn test_fix_amount_rounding() {
        let cfg = RoundConfig {
            price: 2,
            size: 2,
            amount: 4,
        };
        // already within precision
        assert_eq!(fix_amount_rounding(dec!(5.6), &cfg), dec!(5.6));
        // excess digits beyond amount + 4 still leave more than `amount` places
        assert_eq!(fix_amount_rounding(dec!(1.23456789), &cfg), dec!(1.2345));
        // six places, no rounding up happens at eight, truncated to four
        assert_eq!(fix_amount_rounding(dec!(0.123456), &cfg), dec!(0.1234));
        // round-up at amount + 4 can collapse a binary-style artifact
        assert_eq!(fix_amount_rounding(dec!(2.999999999), &cfg), dec!(3));
    }
}
