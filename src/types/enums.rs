use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Order side as the API and the caller spell it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    /// Numeric encoding used by the exchange contract (`uint8 side` in the signed order).
    pub fn exchange_code(&self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Side {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Side::Buy),
            1 => Ok(Side::Sell),
            other => Err(Error::validation(format!("unknown order side code {other}"))),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(Error::validation(format!(
                "order side must be 'BUY' or 'SELL', got '{other}'"
            ))),
        }
    }
}

/// Time-in-force of a posted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Good till cancelled
    #[default]
    Gtc,
    /// Fill or kill
    Fok,
    /// Good till date
    Gtd,
    /// Fill and kill: fill what is available, cancel the rest
    Fak,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Gtc => "GTC",
            OrderType::Fok => "FOK",
            OrderType::Gtd => "GTD",
            OrderType::Fak => "FAK",
        }
    }
}

/// How the exchange verifies the order signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SignatureType {
    /// Externally owned account; signer and maker coincide
    #[default]
    Eoa = 0,
    /// Polymarket proxy wallet (email / Magic accounts)
    PolyProxy = 1,
    /// Gnosis Safe owned by the signer
    PolyGnosisSafe = 2,
}

impl SignatureType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SignatureType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SignatureType::Eoa),
            1 => Ok(SignatureType::PolyProxy),
            2 => Ok(SignatureType::PolyGnosisSafe),
            other => Err(Error::validation(format!("unknown signature type {other}"))),
        }
    }
}

/// Decimal places applied to price, size and derived amount for one tick size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub price: u32,
    pub size: u32,
    pub amount: u32,
}

/// Minimum price increment accepted by a market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSize {
    /// 0.1
    Tenth,
    /// 0.01
    Hundredth,
    /// 0.001
    Thousandth,
    /// 0.0001
    TenThousandth,
}

impl TickSize {
    pub const ALL: [TickSize; 4] = [
        TickSize::Tenth,
        TickSize::Hundredth,
        TickSize::Thousandth,
        TickSize::TenThousandth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TickSize::Tenth => "0.1",
            TickSize::Hundredth => "0.01",
            TickSize::Thousandth => "0.001",
            TickSize::TenThousandth => "0.0001",
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(1, self.decimals())
    }

    /// Number of fractional digits in the tick.
    pub fn decimals(&self) -> u32 {
        match self {
            TickSize::Tenth => 1,
            TickSize::Hundredth => 2,
            TickSize::Thousandth => 3,
            TickSize::TenThousandth => 4,
        }
    }

    /// Fixed rounding table for this tick size.
    pub const fn round_config(&self) -> RoundConfig {
        match self {
            TickSize::Tenth => RoundConfig {
                price: 1,
                size: 2,
                amount: 3,
            },
            TickSize::Hundredth => RoundConfig {
                price: 2,
                size: 2,
                amount: 4,
            },
            TickSize::Thousandth => RoundConfig {
                price: 3,
                size: 2,
                amount: 5,
            },
            TickSize::TenThousandth => RoundConfig {
                price: 4,
                size: 2,
                amount: 6,
            },
        }
    }
}

impl fmt::Display for TickSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<Decimal> for TickSize {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self> {
        let value = value.normalize();
        TickSize::ALL
            .into_iter()
            .find(|tick| tick.as_decimal() == value)
            .ok_or_else(|| Error::validation(format!("invalid tick size {value}")))
    }
}

impl FromStr for TickSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| Error::validation(format!("invalid tick size '{s}': {e}")))?;
        TickSize::try_from(value)
    }
}

impl Serialize for TickSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// The API reports tick sizes as JSON numbers in some endpoints and strings in others.
impl<'de> Deserialize<'de> for TickSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parsing_rejects_unknown() {
        assert_eq!("BUY".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("SELL".parse::<Side>().unwrap(), Side::Sell);
        assert!("buy".parse::<Side>().unwrap_err().is_validation());
        assert!("HOLD".parse::<Side>().unwrap_err().is_validation());
    }

    #[test]
    fn test_exchange_side_encoding() {
        assert_eq!(Side::Buy.exchange_code(), 0);
        assert_eq!(Side::Sell.exchange_code(), 1);
        assert_eq!(Side::try_from(0).unwrap(), Side::Buy);
        assert_eq!(Side::try_from(1).unwrap(), Side::Sell);
        assert!(Side::try_from(7).unwrap_err().is_validation());
    }

    #[test]
    fn test_rounding_configs() {
        assert_eq!(
            TickSize::Tenth.round_config(),
            RoundConfig {
                price: 1,
                size: 2,
                amount: 3
            }
        );
        assert_eq!(
            TickSize::Hundredth.round_config(),
            RoundConfig {
                price: 2,
                size: 2,
                amount: 4
            }
        );
        assert_eq!(TickSize::Thousandth.round_config().amount, 5);
        assert_eq!(TickSize::TenThousandth.round_config().price, 4);
    }

    #[test]
    fn test_tick_size_from_str_and_json() {
        assert_eq!("0.01".parse::<TickSize>().unwrap(), TickSize::Hundredth);
        assert_eq!("0.0010".parse::<TickSize>().unwrap(), TickSize::Thousandth);
        assert!("0.05".parse::<TickSize>().is_err());

        let from_number: TickSize = serde_json::from_str("0.001").unwrap();
        assert_eq!(from_number, TickSize::Thousandth);
        let from_string: TickSize = serde_json::from_str("\"0.1\"").unwrap();
        assert_eq!(from_string, TickSize::Tenth);
        assert_eq!(
            serde_json::to_string(&TickSize::TenThousandth).unwrap(),
            "\"0.0001\""
        );
    }

    #[test]
    fn test_tick_size_decimal_value() {
        assert_eq!(TickSize::Tenth.as_decimal().to_string(), "0.1");
        assert_eq!(TickSize::TenThousandth.as_decimal().to_string(), "0.0001");
    }

    #[test]
    fn test_signature_type_codes() {
        assert_eq!(SignatureType::Eoa.code(), 0);
        assert_eq!(SignatureType::PolyProxy.code(), 1);
        assert_eq!(SignatureType::PolyGnosisSafe.code(), 2);
        assert!(SignatureType::try_from(3).is_err());
    }
}
