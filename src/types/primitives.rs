use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Decimal identifier of an outcome token (ERC1155 position id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the id into the `uint256` the exchange hashes.
    pub fn to_u256(&self) -> Result<U256> {
        U256::from_str_radix(&self.0, 10)
            .map_err(|e| Error::validation(format!("invalid token id '{}': {e}", self.0)))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl FromStr for TokenId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id = TokenId::new(s);
        id.to_u256()?;
        Ok(id)
    }
}

/// Order hash returned by the exchange
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_to_u256() {
        let id = TokenId::new(
            "109648317055340591503076024421581448189531885907475125926203413622318314876012",
        );
        assert!(id.to_u256().is_ok());
        assert_eq!(TokenId::new("1234").to_u256().unwrap(), U256::from(1234u64));
    }

    #[test]
    fn test_token_id_rejects_non_decimal() {
        assert!(TokenId::new("0xabc").to_u256().unwrap_err().is_validation());
        assert!("yes".parse::<TokenId>().is_err());
    }
}
